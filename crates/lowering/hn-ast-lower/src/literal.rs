//! Literal and identifier canonicalization
//!
//! Pure text-level transforms: unicode escape validation, backslash
//! unescaping, numeric parsing with overflow classification, and quoted
//! identifier handling. Every invalid input degrades to a best-effort
//! value plus a diagnostic; none of these functions fail.

use crate::context::LowerContext;
use hn_ast::{Literal, LiteralValue, TypeTag};
use hn_diagnostic::{DiagnosticCode, DiagnosticSink};
use hn_span::Span;
use hn_syntax::{RedToken, SyntaxKind};
use thiserror::Error;

/// First code point of the reserved surrogate band
pub const MIN_UNICODE: u32 = 0xD800;
/// Last code point of the reserved surrogate band
pub const MIDDLE_LIMIT_UNICODE: u32 = 0xDFFF;
/// Largest valid unicode scalar value
pub const MAX_UNICODE: u32 = 0x10FFFF;

/// Prefix marking a quoted identifier literal
pub const IDENTIFIER_LITERAL_PREFIX: char = '\'';

/// A numeric literal that does not fit in an `i64`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[error("numeric literal out of range for a 64-bit integer")]
pub struct OutOfRange;

/// Parses an integer literal in the given radix
pub fn parse_integer(text: &str, radix: u32) -> Result<i64, OutOfRange> {
    i64::from_str_radix(text, radix).map_err(|_| OutOfRange)
}

/// Strips the `0x`/`0X` prefix from a hex literal
pub fn strip_hex_prefix(text: &str) -> String {
    text.to_lowercase().replace("0x", "")
}

/// Appends the mandatory binary exponent when a hex float lacks one
///
/// The numeric grammar requires an explicit `p` exponent; `0x1.8`
/// becomes `0x1.8p0` before any further processing.
pub fn normalize_hex_float(text: &str) -> String {
    if text.contains('p') || text.contains('P') {
        text.to_string()
    } else {
        format!("{text}p0")
    }
}

/// Whether a decimal float literal carries the `decimal` discriminator
pub fn is_decimal_discriminated(text: &str) -> bool {
    text.ends_with('d') || text.ends_with('D')
}

/// Whether an unescaped identifier is alphanumeric-plus-dot only
pub fn is_alphanumeric_identifier(text: &str) -> bool {
    text.chars()
        .all(|character| character.is_ascii_alphanumeric() || character == '.')
}

/// Unescapes and prefix-strips a quoted identifier; other text is
/// returned unchanged
pub fn strip_quoted_identifier(identifier: &str) -> String {
    if identifier.starts_with(IDENTIFIER_LITERAL_PREFIX) {
        let unescaped = unescape(identifier);
        unescaped[IDENTIFIER_LITERAL_PREFIX.len_utf8()..].to_string()
    } else {
        identifier.to_string()
    }
}

struct EscapeMatch {
    start: usize,
    end: usize,
    hex: String,
}

/// Finds the next `\u{...}` or `\uXXXX` escape at or after `from`
fn find_unicode_escape(text: &str, from: usize) -> Option<EscapeMatch> {
    let bytes = text.as_bytes();
    let mut index = from;
    while index + 1 < bytes.len() {
        if bytes[index] != b'\\' || bytes[index + 1] != b'u' {
            index += 1;
            continue;
        }
        let after = index + 2;
        if bytes.get(after) == Some(&b'{') {
            let mut cursor = after + 1;
            while cursor < bytes.len() && bytes[cursor].is_ascii_hexdigit() {
                cursor += 1;
            }
            if cursor > after + 1 && bytes.get(cursor) == Some(&b'}') {
                return Some(EscapeMatch {
                    start: index,
                    end: cursor + 1,
                    hex: text[after + 1..cursor].to_string(),
                });
            }
        } else if after + 4 <= bytes.len()
            && bytes[after..after + 4].iter().all(u8::is_ascii_hexdigit)
        {
            return Some(EscapeMatch {
                start: index,
                end: after + 4,
                hex: text[after..after + 4].to_string(),
            });
        }
        index += 2;
    }
    None
}

/// Validates and canonicalizes every unicode escape in a string literal
///
/// Escapes naming a surrogate or an out-of-range code point are
/// reported as `InvalidUnicode` with the offending escape text, then
/// still rewritten to the canonical zero-padded `\uXXXX` form so that
/// scanning can continue. Scanning resumes two characters before the
/// end of each rewritten escape, which keeps adjacent escapes visible.
pub fn normalize_unicode_escapes(text: &str, pos: Span, sink: &mut DiagnosticSink) -> String {
    let mut text = text.to_string();
    let mut from = 0;
    while let Some(found) = find_unicode_escape(&text, from) {
        let code_point = u32::from_str_radix(&found.hex, 16).ok();
        let valid = match code_point {
            Some(value) => {
                !(MIN_UNICODE..=MIDDLE_LIMIT_UNICODE).contains(&value) && value <= MAX_UNICODE
            }
            None => false,
        };
        if !valid {
            sink.error_with_arg(
                DiagnosticCode::InvalidUnicode,
                pos,
                text[found.start..found.end].to_string(),
            );
        }
        let replacement = format!("\\u{:0>4}", found.hex);
        text.replace_range(found.start..found.end, &replacement);
        from = (found.start + replacement.len()).saturating_sub(2);
    }
    text
}

/// Resolves standard backslash escapes
///
/// `\uXXXX` escapes that survive as invalid scalars decode to the
/// replacement character rather than failing.
pub fn unescape(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut index = 0;
    while index < chars.len() {
        let character = chars[index];
        if character != '\\' || index + 1 >= chars.len() {
            out.push(character);
            index += 1;
            continue;
        }
        match chars[index + 1] {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'u' if index + 6 <= chars.len()
                && chars[index + 2..index + 6]
                    .iter()
                    .all(char::is_ascii_hexdigit) =>
            {
                let hex: String = chars[index + 2..index + 6].iter().collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}');
                out.push(decoded);
                index += 6;
                continue;
            }
            other => out.push(other),
        }
        index += 2;
    }
    out
}

/// Whether a syntax kind is a literal the lowering handles directly
pub(crate) const fn is_simple_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::StringLiteralToken
            | SyntaxKind::DecimalIntegerLiteralToken
            | SyntaxKind::HexIntegerLiteralToken
            | SyntaxKind::DecimalFloatLiteralToken
            | SyntaxKind::HexFloatLiteralToken
            | SyntaxKind::ByteArrayLiteralToken
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
    )
}

/// The nil literal; `original` records which spelling produced it
pub(crate) fn nil_literal(ctx: &LowerContext, pos: Span, original: &str) -> Literal {
    Literal {
        ty: ctx.types.type_from_tag(TypeTag::Nil),
        value: LiteralValue::Nil,
        original_value: original.to_string(),
        pos,
    }
}

/// Lowers a literal-bearing token to a canonical literal value
pub(crate) fn lower_simple_literal(ctx: &mut LowerContext, token: RedToken<'_>) -> Literal {
    let text = token.text();
    let pos = token.text_span();
    let (tag, value) = match token.kind() {
        SyntaxKind::DecimalIntegerLiteralToken => (
            TypeTag::Int,
            integer_value(ctx, text, text, 10, pos, IntegerCodes::DECIMAL),
        ),
        SyntaxKind::HexIntegerLiteralToken => (
            TypeTag::Int,
            integer_value(
                ctx,
                text,
                &strip_hex_prefix(text),
                16,
                pos,
                IntegerCodes::HEX,
            ),
        ),
        SyntaxKind::DecimalFloatLiteralToken => {
            if is_decimal_discriminated(text) {
                (TypeTag::Decimal, LiteralValue::Decimal(text.to_string()))
            } else {
                (TypeTag::Float, LiteralValue::Float(text.to_string()))
            }
        }
        SyntaxKind::HexFloatLiteralToken => {
            (TypeTag::Float, LiteralValue::Float(normalize_hex_float(text)))
        }
        SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => (
            TypeTag::Boolean,
            LiteralValue::Bool(token.kind() == SyntaxKind::TrueKeyword),
        ),
        SyntaxKind::StringLiteralToken => {
            let normalized = normalize_unicode_escapes(text, pos, &mut ctx.sink);
            (TypeTag::String, LiteralValue::String(unescape(&normalized)))
        }
        SyntaxKind::ByteArrayLiteralToken => {
            (TypeTag::ByteArray, LiteralValue::ByteArray(text.to_string()))
        }
        other => {
            ctx.sink.error_with_arg(
                DiagnosticCode::UnsupportedConstruct,
                pos,
                format!("{other:?}"),
            );
            (TypeTag::Nil, LiteralValue::Nil)
        }
    };
    Literal {
        ty: ctx.types.type_from_tag(tag),
        value,
        original_value: text.to_string(),
        pos,
    }
}

struct IntegerCodes {
    too_small: DiagnosticCode,
    too_large: DiagnosticCode,
}

impl IntegerCodes {
    const DECIMAL: Self = Self {
        too_small: DiagnosticCode::IntegerTooSmall,
        too_large: DiagnosticCode::IntegerTooLarge,
    };
    const HEX: Self = Self {
        too_small: DiagnosticCode::HexadecimalTooSmall,
        too_large: DiagnosticCode::HexadecimalTooLarge,
    };
}

/// Parses an integer literal, degrading to the original text on overflow
fn integer_value(
    ctx: &mut LowerContext,
    original: &str,
    processed: &str,
    radix: u32,
    pos: Span,
    codes: IntegerCodes,
) -> LiteralValue {
    match parse_integer(processed, radix) {
        Ok(value) => LiteralValue::Int(value),
        Err(OutOfRange) => {
            let code = if original.starts_with('-') {
                codes.too_small
            } else {
                codes.too_large
            };
            ctx.sink.error_with_arg(code, pos, original);
            LiteralValue::Raw(original.to_string())
        }
    }
}
