//! String and string-array predicates.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_text, validate_text_list};
use crate::value::Value;

use super::{Predicate, PredicateKind};

const fn default_case_sensitive() -> bool {
    true
}

fn fold(s: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.to_lowercase())
    }
}

/// How a string predicate compares its literal against the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StringMatch {
    #[default]
    Exact,
    Begin,
    End,
    Contains,
}

impl StringMatch {
    fn test(self, input: &str, literal: &str) -> bool {
        match self {
            Self::Exact => input == literal,
            Self::Begin => input.starts_with(literal),
            Self::End => input.ends_with(literal),
            Self::Contains => input.contains(literal),
        }
    }
}

/// Matches string values against a literal.
///
/// # Examples
///
/// ```
/// use attribute_filter::predicate::{Predicate, StringMatch, StringPredicate};
/// use attribute_filter::Value;
///
/// let p = StringPredicate::new(StringMatch::Contains, "Foo").case_insensitive();
/// assert!(p.matches(Some(&Value::from("this is foo bar"))));
/// assert!(!p.matches(Some(&Value::from("this is bar"))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringPredicate {
    #[serde(rename = "match", default)]
    pub match_mode: StringMatch,

    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,

    pub value: String,

    #[serde(default)]
    pub negate: bool,
}

impl StringPredicate {
    /// Creates a case-sensitive, non-negated predicate.
    #[must_use]
    pub fn new(match_mode: StringMatch, value: impl Into<String>) -> Self {
        Self {
            match_mode,
            case_sensitive: true,
            value: value.into(),
            negate: false,
        }
    }

    #[must_use]
    pub fn exact(value: impl Into<String>) -> Self {
        Self::new(StringMatch::Exact, value)
    }

    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }
}

impl Predicate for StringPredicate {
    const KIND: PredicateKind = PredicateKind::String;

    fn matches(&self, value: Option<&Value>) -> bool {
        let Some(input) = value.and_then(Value::as_str) else {
            return false;
        };
        let input = fold(input, self.case_sensitive);
        let literal = fold(&self.value, self.case_sensitive);
        self.match_mode.test(&input, &literal) != self.negate
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("value", &self.value)
    }
}

/// How a string-array predicate relates its literals to the input array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArrayMatch {
    /// Every literal appears somewhere in the input.
    #[default]
    All,
    /// At least one literal appears in the input.
    Any,
    /// The input equals the literals element by element.
    Ordered,
}

/// Matches array values against a sequence of string literals.
///
/// Non-string elements of the input never equal a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringArrayPredicate {
    pub value: Vec<String>,

    #[serde(rename = "match", default)]
    pub match_mode: ArrayMatch,

    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

impl StringArrayPredicate {
    #[must_use]
    pub fn new<I, S>(match_mode: ArrayMatch, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: values.into_iter().map(Into::into).collect(),
            match_mode,
            case_sensitive: true,
        }
    }

    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }
}

impl Predicate for StringArrayPredicate {
    const KIND: PredicateKind = PredicateKind::StringArray;

    fn matches(&self, value: Option<&Value>) -> bool {
        let Some(items) = value.and_then(Value::as_array) else {
            return false;
        };
        let inputs: Vec<Option<Cow<'_, str>>> = items
            .iter()
            .map(|item| item.as_str().map(|s| fold(s, self.case_sensitive)))
            .collect();
        let contains = |literal: &String| {
            let literal = fold(literal, self.case_sensitive);
            inputs.iter().any(|input| input.as_deref() == Some(&*literal))
        };

        match self.match_mode {
            ArrayMatch::All => self.value.iter().all(contains),
            ArrayMatch::Any => self.value.iter().any(contains),
            ArrayMatch::Ordered => {
                inputs.len() == self.value.len()
                    && inputs.iter().zip(&self.value).all(|(input, literal)| {
                        input.as_deref() == Some(&*fold(literal, self.case_sensitive))
                    })
            }
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_text_list("value", &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s(v: &str) -> Value {
        Value::from(v)
    }

    fn arr(items: serde_json::Value) -> Value {
        Value::from(items)
    }

    #[test]
    fn test_exact_default_case_sensitive() {
        let p = StringPredicate::exact("On");
        assert!(p.matches(Some(&s("On"))));
        assert!(!p.matches(Some(&s("on"))));
    }

    #[test]
    fn test_contains_case_insensitive() {
        let p = StringPredicate::new(StringMatch::Contains, "Foo").case_insensitive();
        assert!(p.matches(Some(&s("this is foo bar"))));
        assert!(!p.matches(Some(&s("this is bar"))));
    }

    #[test]
    fn test_begin_and_end() {
        assert!(StringPredicate::new(StringMatch::Begin, "abc").matches(Some(&s("abcdef"))));
        assert!(!StringPredicate::new(StringMatch::Begin, "def").matches(Some(&s("abcdef"))));
        assert!(StringPredicate::new(StringMatch::End, "def").matches(Some(&s("abcdef"))));
    }

    #[test]
    fn test_negate() {
        let p = StringPredicate::exact("off").negated();
        assert!(p.matches(Some(&s("on"))));
        assert!(!p.matches(Some(&s("off"))));
    }

    #[test]
    fn test_missing_or_mismatched_never_matches() {
        let p = StringPredicate::exact("1").negated();
        assert!(!p.matches(None));
        assert!(!p.matches(Some(&Value::Int(1))));
    }

    #[test]
    fn test_string_wire_defaults() {
        let p: StringPredicate = serde_json::from_value(json!({"value": "x"})).unwrap();
        assert_eq!(p, StringPredicate::exact("x"));
    }

    #[test]
    fn test_array_all() {
        let p = StringArrayPredicate::new(ArrayMatch::All, ["a", "b"]);
        assert!(p.matches(Some(&arr(json!(["b", "c", "a"])))));
        assert!(!p.matches(Some(&arr(json!(["a", "c"])))));
    }

    #[test]
    fn test_array_any() {
        let p = StringArrayPredicate::new(ArrayMatch::Any, ["a", "b"]);
        assert!(p.matches(Some(&arr(json!(["x", "b"])))));
        assert!(!p.matches(Some(&arr(json!(["x", "y"])))));
    }

    #[test]
    fn test_array_ordered() {
        let p = StringArrayPredicate::new(ArrayMatch::Ordered, ["a", "b"]);
        assert!(p.matches(Some(&arr(json!(["a", "b"])))));
        assert!(!p.matches(Some(&arr(json!(["b", "a"])))));
        assert!(!p.matches(Some(&arr(json!(["a", "b", "c"])))));
    }

    #[test]
    fn test_array_case_insensitive() {
        let p = StringArrayPredicate::new(ArrayMatch::All, ["Alarm"]).case_insensitive();
        assert!(p.matches(Some(&arr(json!(["ALARM"])))));
    }

    #[test]
    fn test_array_ignores_non_strings() {
        let p = StringArrayPredicate::new(ArrayMatch::Any, ["1"]);
        assert!(!p.matches(Some(&arr(json!([1, 2])))));
        assert!(!p.matches(Some(&s("1"))));
        assert!(!p.matches(None));
    }
}
