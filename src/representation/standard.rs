//! The default representation policy.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use unicode_width::UnicodeWidthStr;

use super::{FormatterFn, FormatterKey, Radix, Representation, grouped_digits};
use crate::value::{ObjectRef, Value};

/// Default number of collection elements printed before eliding.
pub const DEFAULT_MAX_ELEMENTS_FOR_PRINTING: usize = 1000;

/// Default width (in terminal cells) above which collections go multi-line.
pub const DEFAULT_MAX_LENGTH_FOR_SINGLE_LINE_DESCRIPTION: usize = 80;

const ELEMENTS_EXCEEDED: &str = "...";
const SEPARATOR: &str = ",";
const SINGLE_LINE_INDENT: &str = " ";
const MULTI_LINE_SEPARATOR: &str = ",\n";
const MULTI_LINE_INDENT: &str = "    ";

/// Renders values the way failure messages show them by default.
///
/// | Value | Rendering |
/// |-------|-----------|
/// | null | `null` |
/// | string | `"text"` |
/// | char | `'c'` |
/// | `i64` / `f32` | `42L` / `1.5f` |
/// | array, sequence | `[a, b, c]` |
/// | map | `{k=v, k2=v2}` |
/// | optional | `Optional[v]` / `Optional.empty` |
/// | enum | variant name |
/// | object | `Type(field=value, ...)` |
///
/// Collections longer than [`Self::max_elements_for_printing`] keep their
/// first and last elements around `...`. A collection whose single-line form
/// is wider than [`Self::max_length_for_single_line_description`] is printed
/// one element per line.
#[derive(Clone)]
pub struct StandardRepresentation {
    max_elements_for_printing: usize,
    max_length_for_single_line_description: usize,
    formatters: HashMap<FormatterKey, FormatterFn>,
    radix: Radix,
}

impl Default for StandardRepresentation {
    fn default() -> Self {
        Self {
            max_elements_for_printing: DEFAULT_MAX_ELEMENTS_FOR_PRINTING,
            max_length_for_single_line_description: DEFAULT_MAX_LENGTH_FOR_SINGLE_LINE_DESCRIPTION,
            formatters: HashMap::new(),
            radix: Radix::Decimal,
        }
    }
}

impl fmt::Debug for StandardRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.formatters.keys().collect();
        keys.sort();
        f.debug_struct("StandardRepresentation")
            .field("max_elements_for_printing", &self.max_elements_for_printing)
            .field(
                "max_length_for_single_line_description",
                &self.max_length_for_single_line_description,
            )
            .field("formatters", &keys)
            .field("radix", &self.radix)
            .finish()
    }
}

impl StandardRepresentation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many collection elements are printed; values below 1 count as 1.
    #[must_use]
    pub fn with_max_elements_for_printing(mut self, max: usize) -> Self {
        self.max_elements_for_printing = max.max(1);
        self
    }

    /// Set the single-line width limit; values below 1 count as 1.
    #[must_use]
    pub fn with_max_length_for_single_line_description(mut self, max: usize) -> Self {
        self.max_length_for_single_line_description = max.max(1);
        self
    }

    /// Register a custom formatter. A type-name key takes precedence over a
    /// category key for the same value.
    #[must_use]
    pub fn with_formatter<F>(mut self, key: FormatterKey, formatter: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.formatters.insert(key, Arc::new(formatter));
        self
    }

    /// Drop every registered formatter.
    #[must_use]
    pub fn without_formatters(mut self) -> Self {
        self.formatters.clear();
        self
    }

    pub(crate) fn with_radix(mut self, radix: Radix) -> Self {
        self.radix = radix;
        self
    }

    #[must_use]
    pub fn max_elements_for_printing(&self) -> usize {
        self.max_elements_for_printing
    }

    #[must_use]
    pub fn max_length_for_single_line_description(&self) -> usize {
        self.max_length_for_single_line_description
    }

    fn formatter_for(&self, value: &Value) -> Option<&FormatterFn> {
        if self.formatters.is_empty() {
            return None;
        }
        self.formatters
            .get(&FormatterKey::Type(value.type_name()))
            .or_else(|| self.formatters.get(&FormatterKey::Category(value.category())))
    }

    /// Render `value`; `parents` holds the ids of the objects being rendered.
    fn render(&self, value: &Value, parents: &mut Vec<usize>) -> String {
        if let Some(formatter) = self.formatter_for(value) {
            return formatter(value);
        }
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Char(c) => self.render_char(*c),
            Value::Byte(v) => self.render_integer(i64::from(*v), 8, ""),
            Value::Short(v) => self.render_integer(i64::from(*v), 16, ""),
            Value::Int(v) => self.render_integer(i64::from(*v), 32, ""),
            Value::Long(v) => self.render_integer(*v, 64, "L"),
            Value::Float(v) => match self.radix {
                Radix::Decimal => format!("{}f", decimal_float(*v)),
                radix => grouped_digits(u64::from(v.to_bits()), 32, radix),
            },
            Value::Double(v) => match self.radix {
                Radix::Decimal => decimal_float(*v),
                radix => grouped_digits(v.to_bits(), 64, radix),
            },
            Value::Str(s) => self.render_str(s),
            Value::Array(items) | Value::Sequence { items, .. } => {
                self.render_group(items, parents)
            }
            Value::Map { entries, .. } => self.render_map(entries, parents),
            Value::Optional(None) => "Optional.empty".to_string(),
            Value::Optional(Some(inner)) => format!("Optional[{}]", self.render(inner, parents)),
            Value::Enum { variant, .. } => variant.clone(),
            Value::Object(object) => self.render_object(object, parents),
        }
    }

    #[allow(clippy::cast_sign_loss)]
    fn render_integer(&self, v: i64, width: u32, suffix: &str) -> String {
        match self.radix {
            Radix::Decimal => format!("{v}{suffix}"),
            radix => {
                let mask = if width == 64 {
                    u64::MAX
                } else {
                    (1u64 << width) - 1
                };
                grouped_digits(v as u64 & mask, width, radix)
            }
        }
    }

    fn render_char(&self, c: char) -> String {
        match self.radix {
            Radix::Decimal => format!("'{c}'"),
            radix => {
                let code = u32::from(c);
                let width = if code > 0xFFFF { 32 } else { 16 };
                format!("'{}'", grouped_digits(u64::from(code), width, radix))
            }
        }
    }

    fn render_str(&self, s: &str) -> String {
        match self.radix {
            Radix::Decimal => format!("\"{s}\""),
            _ => {
                let chars: Vec<String> = s.chars().map(|c| self.render_char(c)).collect();
                format!("\"[{}]\"", chars.join(", "))
            }
        }
    }

    fn render_object(&self, object: &ObjectRef, parents: &mut Vec<usize>) -> String {
        let id = object.id();
        if parents.last() == Some(&id) {
            return "(this instance)".to_string();
        }
        if parents.contains(&id) {
            return "(cycle)".to_string();
        }
        parents.push(id);
        let fields: Vec<String> = object
            .fields()
            .iter()
            .map(|(name, value)| format!("{name}={}", self.render(value, parents)))
            .collect();
        parents.pop();
        format!("{}({})", object.type_name(), fields.join(", "))
    }

    fn render_map(&self, entries: &[(Value, Value)], parents: &mut Vec<usize>) -> String {
        let mut parts = Vec::with_capacity(entries.len().min(self.max_elements_for_printing) + 1);
        for (printed, (key, value)) in entries.iter().enumerate() {
            if printed == self.max_elements_for_printing {
                parts.push(ELEMENTS_EXCEEDED.to_string());
                break;
            }
            parts.push(format!(
                "{}={}",
                self.render(key, parents),
                self.render(value, parents)
            ));
        }
        format!("{{{}}}", parts.join(", "))
    }

    fn render_group(&self, items: &[Value], parents: &mut Vec<usize>) -> String {
        let max = self.max_elements_for_printing;
        let elided = items.len() > max;
        let rendered: Vec<String> = if elided {
            let head = (max + 1) / 2;
            let tail = max / 2;
            items[..head]
                .iter()
                .chain(&items[items.len() - tail..])
                .map(|item| self.render(item, parents))
                .collect()
        } else {
            items.iter().map(|item| self.render(item, parents)).collect()
        };

        let single_line = self.join_group(&rendered, elided, false);
        if single_line.width() <= self.max_length_for_single_line_description {
            single_line
        } else {
            self.join_group(&rendered, elided, true)
        }
    }

    fn join_group(&self, elements: &[String], elided: bool, multi_line: bool) -> String {
        let (separator, indent) = if multi_line {
            (MULTI_LINE_SEPARATOR, MULTI_LINE_INDENT)
        } else {
            (SEPARATOR, SINGLE_LINE_INDENT)
        };
        let mut out = String::from("[");
        if elided {
            let head = (self.max_elements_for_printing + 1) / 2;
            for element in &elements[..head] {
                out.push_str(element);
                out.push_str(separator);
                out.push_str(indent);
            }
            out.push_str(ELEMENTS_EXCEEDED);
            if multi_line {
                out.push('\n');
            }
            for (i, element) in elements[head..].iter().enumerate() {
                if i != 0 {
                    out.push_str(separator);
                }
                out.push_str(indent);
                out.push_str(element);
            }
        } else {
            for (i, element) in elements.iter().enumerate() {
                if i != 0 {
                    out.push_str(indent);
                }
                out.push_str(element);
                if i + 1 != elements.len() {
                    out.push_str(separator);
                }
            }
        }
        out.push(']');
        out
    }
}

impl Representation for StandardRepresentation {
    fn to_string_of(&self, value: &Value) -> String {
        self.render(value, &mut Vec::new())
    }
}

/// Plain notation between `1e-3` and `1e7`, scientific (`1.0E20`) outside.
/// Integral-looking mantissas get a `.0` so they read as floats.
fn decimal_float<F>(value: F) -> String
where
    F: Into<f64> + Copy + fmt::Display + fmt::LowerExp,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        return "NaN".to_string();
    }
    if wide.is_infinite() {
        return if wide > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = wide.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return with_fraction(&value.to_string());
    }
    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => format!("{}E{exponent}", with_fraction(mantissa)),
        None => scientific,
    }
}

fn with_fraction(text: &str) -> String {
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        format!("{text}.0")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{SequenceKind, ValueCategory};

    fn repr() -> StandardRepresentation {
        StandardRepresentation::default()
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    #[test]
    fn test_scalars() {
        let r = repr();
        assert_eq!(r.to_string_of(&Value::Null), "null");
        assert_eq!(r.to_string_of(&Value::from("Yoda")), "\"Yoda\"");
        assert_eq!(r.to_string_of(&Value::Char('a')), "'a'");
        assert_eq!(r.to_string_of(&Value::Int(3)), "3");
        assert_eq!(r.to_string_of(&Value::Long(3)), "3L");
        assert_eq!(r.to_string_of(&Value::Float(1.5)), "1.5f");
        assert_eq!(r.to_string_of(&Value::Float(2.0)), "2.0f");
        assert_eq!(r.to_string_of(&Value::Double(2.0)), "2.0");
        assert_eq!(r.to_string_of(&Value::Double(f64::NAN)), "NaN");
        assert_eq!(r.to_string_of(&Value::Bool(true)), "true");
    }

    #[test]
    fn test_float_extremes() {
        let r = repr();
        assert_eq!(r.to_string_of(&Value::Float(f32::INFINITY)), "Infinityf");
        assert_eq!(r.to_string_of(&Value::Double(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(r.to_string_of(&Value::Float(f32::NAN)), "NaNf");
        assert_eq!(r.to_string_of(&Value::Float(1e20)), "1.0E20f");
        assert_eq!(r.to_string_of(&Value::Double(1.5e-5)), "1.5E-5");
        assert_eq!(r.to_string_of(&Value::Double(-2.5e10)), "-2.5E10");
        assert_eq!(r.to_string_of(&Value::Double(1e7)), "1.0E7");
        assert_eq!(r.to_string_of(&Value::Double(9_999_999.0)), "9999999.0");
        assert_eq!(r.to_string_of(&Value::Double(0.001)), "0.001");
        assert_eq!(r.to_string_of(&Value::Double(0.0)), "0.0");
    }

    #[test]
    fn test_optional_and_enum() {
        let r = repr();
        assert_eq!(r.to_string_of(&Value::some("x")), "Optional[\"x\"]");
        assert_eq!(r.to_string_of(&Value::none()), "Optional.empty");
        assert_eq!(r.to_string_of(&Value::variant("Color", "RED")), "RED");
    }

    // =========================================================================
    // Collections
    // =========================================================================

    #[test]
    fn test_list_single_line() {
        let v = Value::list(["Luke", "Yoda"]);
        assert_eq!(repr().to_string_of(&v), "[\"Luke\", \"Yoda\"]");
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(repr().to_string_of(&Value::list(Vec::<i32>::new())), "[]");
        assert_eq!(
            repr().to_string_of(&Value::map(Vec::<(i32, i32)>::new())),
            "{}"
        );
    }

    #[test]
    fn test_long_list_goes_multi_line() {
        let r = repr().with_max_length_for_single_line_description(10);
        let v = Value::list(["first", "second"]);
        assert_eq!(r.to_string_of(&v), "[\"first\",\n    \"second\"]");
    }

    #[test]
    fn test_elided_single_line() {
        let r = repr().with_max_elements_for_printing(4);
        let v = Value::list(1..=10);
        assert_eq!(r.to_string_of(&v), "[1, 2, ... 9, 10]");
    }

    #[test]
    fn test_elided_odd_max_prints_more_head() {
        let r = repr().with_max_elements_for_printing(3);
        let v = Value::list(1..=10);
        assert_eq!(r.to_string_of(&v), "[1, 2, ... 10]");
    }

    #[test]
    fn test_elided_multi_line() {
        let r = repr()
            .with_max_elements_for_printing(2)
            .with_max_length_for_single_line_description(5);
        let v = Value::list(1..=10);
        assert_eq!(r.to_string_of(&v), "[1,\n    ...\n    10]");
    }

    #[test]
    fn test_map_rendering_and_elision() {
        let v = Value::map([("name", "Yoda"), ("job", "Jedi")]);
        assert_eq!(repr().to_string_of(&v), "{\"name\"=\"Yoda\", \"job\"=\"Jedi\"}");
        let r = repr().with_max_elements_for_printing(1);
        assert_eq!(r.to_string_of(&v), "{\"name\"=\"Yoda\", ...}");
    }

    #[test]
    fn test_unordered_sequence_renders_like_list() {
        let v = Value::sequence(SequenceKind::Unordered, "HashSet", [1]);
        assert_eq!(repr().to_string_of(&v), "[1]");
    }

    #[test]
    fn test_width_uses_terminal_cells() {
        // Six CJK characters are twelve cells wide.
        let r = repr().with_max_length_for_single_line_description(12);
        let v = Value::list(["日本語", "中文"]);
        assert!(r.to_string_of(&v).contains('\n'));
    }

    // =========================================================================
    // Objects
    // =========================================================================

    #[test]
    fn test_object_fields() {
        let o = ObjectRef::new("Person")
            .with_field("first", "Luke")
            .with_field("age", 19);
        assert_eq!(
            repr().to_string_of(&Value::from(o)),
            "Person(first=\"Luke\", age=19)"
        );
    }

    #[test]
    fn test_self_reference_is_this_instance() {
        let node = ObjectRef::new("Node").with_field("id", 1);
        node.set_field("next", node.clone());
        assert_eq!(
            repr().to_string_of(&Value::from(node)),
            "Node(id=1, next=(this instance))"
        );
    }

    #[test]
    fn test_indirect_cycle() {
        let a = ObjectRef::new("A");
        let b = ObjectRef::new("B").with_field("a", a.clone());
        a.set_field("b", b);
        assert_eq!(repr().to_string_of(&Value::from(a)), "A(b=B(a=(cycle)))");
    }

    // =========================================================================
    // Formatter registry
    // =========================================================================

    #[test]
    fn test_category_formatter() {
        let r = repr().with_formatter(FormatterKey::Category(ValueCategory::Str), |v| {
            v.as_str().unwrap_or_default().to_uppercase()
        });
        assert_eq!(r.to_string_of(&Value::list(["a", "b"])), "[A, B]");
    }

    #[test]
    fn test_type_formatter_wins_over_category() {
        let r = repr()
            .with_formatter(FormatterKey::Category(ValueCategory::Sequence), |_| {
                "category".into()
            })
            .with_formatter(FormatterKey::type_name("Vec"), |_| "type".into());
        assert_eq!(r.to_string_of(&Value::list([1])), "type");
        assert_eq!(r.to_string_of(&Value::set([1])), "category");
    }
}
