use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tagged union over the value kinds the demos exercise. Mirrors the
/// scripting-language primitive/reference split with one numeric kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// The `typeof` table, quirks included: null reports "object".
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) | Value::Object(_) => "object",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Object(_) => true,
        }
    }

    /// Loose equality: numeric strings coerce to numbers before comparing,
    /// so `5 == "5"` holds where strict equality does not.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(n), Value::Str(s)) | (Value::Str(s), Value::Number(n)) => {
                s.trim().parse::<f64>().map(|parsed| parsed == *n).unwrap_or(false)
            }
            (Value::Bool(b), Value::Number(n)) | (Value::Number(n), Value::Bool(b)) => {
                (if *b { 1.0 } else { 0.0 }) == *n
            }
            (Value::Null, Value::Undefined) | (Value::Undefined, Value::Null) => true,
            (a, b) => a == b,
        }
    }

    /// Logical AND with operand semantics: yields `other` when self is
    /// truthy, otherwise self.
    pub fn and(self, other: Value) -> Value {
        if self.is_truthy() {
            other
        } else {
            self
        }
    }

    /// Logical OR with operand semantics: yields self when truthy,
    /// otherwise `other`.
    pub fn or(self, other: Value) -> Value {
        if self.is_truthy() {
            self
        } else {
            other
        }
    }

    /// `isNaN`-style check: anything that does not read as a number.
    pub fn is_nan_like(&self) -> bool {
        match self {
            Value::Number(n) => n.is_nan(),
            Value::Str(s) => s.trim().parse::<f64>().is_err(),
            Value::Bool(_) => false,
            _ => true,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Object(fields) => {
                let rendered: Vec<String> =
                    fields.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}

/// Plain in-memory record: construct by literal, mutate by assignment,
/// discard at process end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    pub fn to_value(&self) -> Value {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), Value::Str(self.name.clone()));
        fields.insert("age".to_string(), Value::Number(f64::from(self.age)));
        Value::Object(fields)
    }
}

/// Composition replaces prototype chains: the base struct is embedded and
/// dispatch goes through the trait.
pub trait Speak {
    fn name(&self) -> &str;
    fn speak(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Animal {
    pub name: String,
}

impl Animal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Speak for Animal {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> String {
        format!("{} makes a sound.", self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Dog {
    pub base: Animal,
    pub breed: String,
}

impl Dog {
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            base: Animal::new(name),
            breed: breed.into(),
        }
    }
}

impl Speak for Dog {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn speak(&self) -> String {
        format!("{} the {} barks.", self.base.name, self.breed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_table() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::Null.type_name(), "object");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::Number(45.0).type_name(), "number");
        assert_eq!(Value::Str("dulon mahadi".into()).type_name(), "string");
        assert_eq!(Value::Object(BTreeMap::new()).type_name(), "object");
    }

    #[test]
    fn test_loose_vs_strict_equality() {
        let five = Value::Number(5.0);
        let five_str = Value::Str("5".into());
        assert!(five.loose_eq(&five_str));
        assert_ne!(five, five_str);
        assert!(Value::Null.loose_eq(&Value::Undefined));
        assert_ne!(Value::Null, Value::Undefined);
    }

    #[test]
    fn test_logical_operators_return_operands() {
        assert_eq!(
            Value::Bool(true).and(Value::Number(30.0)),
            Value::Number(30.0)
        );
        assert_eq!(
            Value::Bool(false).and(Value::Number(31.0)),
            Value::Bool(false)
        );
        assert_eq!(Value::Bool(true).or(Value::Number(50.0)), Value::Bool(true));
        assert_eq!(
            Value::Bool(false).or(Value::Number(51.0)),
            Value::Number(51.0)
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(Value::Str("x".into()).is_truthy());
        assert!(Value::List(vec![]).is_truthy());
    }

    #[test]
    fn test_nan_like() {
        assert!(Value::Str("st".into()).is_nan_like());
        assert!(!Value::Number(45.0).is_nan_like());
        assert!(!Value::Str("45".into()).is_nan_like());
    }

    #[test]
    fn test_person_round_trip_preserves_fields() {
        let person = Person::new("Dulon Mahadi", 30);
        let value = person.to_value();
        let Value::Object(fields) = &value else {
            panic!("expected object value");
        };
        assert_eq!(fields.get("name"), Some(&Value::Str("Dulon Mahadi".into())));
        assert_eq!(fields.get("age"), Some(&Value::Number(30.0)));

        let json = value.to_json();
        assert_eq!(Value::from_json(&json), value);
    }

    #[test]
    fn test_dynamic_dispatch_through_speak() {
        let animals: Vec<Box<dyn Speak>> = vec![
            Box::new(Animal::new("Generic")),
            Box::new(Dog::new("Rex", "Labrador")),
        ];
        assert_eq!(animals[0].speak(), "Generic makes a sound.");
        assert_eq!(animals[1].speak(), "Rex the Labrador barks.");
        assert_eq!(animals[1].name(), "Rex");
    }
}
