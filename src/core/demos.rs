use crate::domain::model::{Animal, Dog, Person, Speak, Value};
use crate::domain::ports::OutputSink;
use crate::utils::error::{Result, SandboxError};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Declaration-style: `(a + b) * c`.
pub fn sum(a: i64, b: i64, c: i64) -> i64 {
    (a + b) * c
}

/// Expression-style: `a * b - c`.
pub fn sum_expr(a: i64, b: i64, c: i64) -> i64 {
    a * b - c
}

/// Arrow-style: `2a + 4b + 6c`.
pub fn sum_arrow(a: i64, b: i64, c: i64) -> i64 {
    a * 2 + b * 4 + c * 6
}

/// Default parameters expressed as options resolved at the call site.
pub fn greet(name: Option<&str>, age: Option<u32>) -> String {
    let name = name.unwrap_or("dulon mahadi");
    let age = age.unwrap_or(18);
    format!("i am: {}. Age goes to: {}", name, age)
}

/// Rest parameters: two fixed leading arguments, the tail collected.
pub fn accumulate(a: i64, b: i64, rest: &[i64]) -> (i64, Vec<i64>) {
    (a + b, rest.to_vec())
}

/// Callback shape: the caller supplies the continuation. Absent input is a
/// type mismatch, propagated immediately rather than swallowed.
pub fn process_data<F: FnOnce(&str)>(input: Option<&str>, callback: F) -> Result<()> {
    let data = input.ok_or_else(|| SandboxError::TypeMismatch {
        operation: "process_data".to_string(),
        expected: "string".to_string(),
        actual: "undefined".to_string(),
    })?;
    let processed = data.to_uppercase();
    callback(&processed);
    Ok(())
}

/// The async illustration as a blocking result-or-error call. There is no
/// real coordination to preserve, only the success/failure/finally shape.
pub fn fetch_data(succeed: bool) -> Result<String> {
    if succeed {
        Ok("data received".to_string())
    } else {
        Err(SandboxError::FetchFailed {
            reason: "simulated network failure".to_string(),
        })
    }
}

fn run_functions(sink: &mut dyn OutputSink) -> Result<()> {
    sink.emit(&format!("Result: {}", sum(2, 2, 10)));
    sink.emit(&format!("repeat of: {}", sum_expr(2, 2, 10)));
    sink.emit(&format!("result goes to: {}", sum_arrow(2, 3, 4)));
    sink.emit(&greet(Some("alice"), None));
    sink.emit(&greet(None, None));
    let (head, rest) = accumulate(1, 2, &[3, 4, 5]);
    sink.emit(&format!("{}", head));
    sink.emit(&format!("rest params: {:?}", rest));
    Ok(())
}

fn run_types(sink: &mut dyn OutputSink) -> Result<()> {
    let samples = [
        Value::Str("my name is dulon".to_string()),
        Value::Number(12366.0),
        Value::Number(13.25),
        Value::Bool(true),
        Value::Undefined,
        Value::Null,
    ];
    for value in &samples {
        sink.emit(&format!("{} : {}", value, value.type_name()));
    }
    Ok(())
}

fn run_equality(sink: &mut dyn OutputSink) -> Result<()> {
    let five = Value::Number(5.0);
    let five_str = Value::Str("5".to_string());
    sink.emit(&format!("5 == '5' : {}", five.loose_eq(&five_str)));
    sink.emit(&format!("5 === '5' : {}", five == five_str));

    sink.emit(&format!(
        "true && 30 : {}",
        Value::Bool(true).and(Value::Number(30.0))
    ));
    sink.emit(&format!(
        "false && 31 : {}",
        Value::Bool(false).and(Value::Number(31.0))
    ));
    sink.emit(&format!(
        "true || 50 : {}",
        Value::Bool(true).or(Value::Number(50.0))
    ));
    sink.emit(&format!(
        "false || 51 : {}",
        Value::Bool(false).or(Value::Number(51.0))
    ));

    let married = false;
    let status = if married { "married man" } else { "unmarried man" };
    sink.emit(&format!("status: {}", status));

    sink.emit(&format!(
        "isNaN('st') : {}",
        Value::Str("st".to_string()).is_nan_like()
    ));
    sink.emit(&format!("isNaN(45) : {}", Value::Number(45.0).is_nan_like()));
    Ok(())
}

fn run_objects(sink: &mut dyn OutputSink) -> Result<()> {
    let mut person = Person::new("Dulon Mahadi", 30);
    sink.emit(&format!("person: {}", person.to_value()));

    person.age = 31;
    sink.emit(&format!("after birthday: {}", person.to_value()));

    if let Value::Object(fields) = person.to_value() {
        for (key, value) in &fields {
            sink.emit(&format!("  {} = {}", key, value));
        }
    }

    let json = serde_json::to_string(&person)?;
    let restored: Person = serde_json::from_str(&json)?;
    sink.emit(&format!("round-trip intact: {}", restored == person));
    Ok(())
}

fn run_arrays(sink: &mut dyn OutputSink) -> Result<()> {
    let salaries = vec![12500i64, 250041, 215548];
    sink.emit(&format!("salaries: {:?}", salaries));
    sink.emit(&format!("third entry: {}", salaries[2]));

    // Destructuring: first, second, rest.
    if let [first, second, rest @ ..] = salaries.as_slice() {
        sink.emit(&format!("first: {}", first));
        sink.emit(&format!("second: {}", second));
        sink.emit(&format!("rest: {:?}", rest));
    }

    let doubled: Vec<i64> = salaries.iter().map(|s| s * 2).collect();
    sink.emit(&format!("doubled: {:?}", doubled));
    Ok(())
}

fn run_collections(sink: &mut dyn OutputSink) -> Result<()> {
    let mut levels: HashSet<String> = HashSet::new();
    levels.insert("declaration".to_string());
    sink.emit(&format!(
        "set has 'declaration' after add: {}",
        levels.contains("declaration")
    ));
    levels.remove("declaration");
    sink.emit(&format!(
        "set has 'declaration' after remove: {}",
        levels.contains("declaration")
    ));

    let mut ages: HashMap<String, u32> = HashMap::new();
    ages.insert("dulon".to_string(), 30);
    match ages.get("dulon") {
        Some(age) => sink.emit(&format!("map['dulon'] = {}", age)),
        None => sink.emit("map['dulon'] absent"),
    }
    match ages.get("nobody") {
        Some(age) => sink.emit(&format!("map['nobody'] = {}", age)),
        None => sink.emit("map['nobody'] absent"),
    }
    Ok(())
}

fn run_classes(sink: &mut dyn OutputSink) -> Result<()> {
    let animals: Vec<Box<dyn Speak>> = vec![
        Box::new(Animal::new("Generic")),
        Box::new(Dog::new("Rex", "Labrador")),
    ];
    for animal in &animals {
        sink.emit(&animal.speak());
    }
    Ok(())
}

fn run_callbacks(sink: &mut dyn OutputSink) -> Result<()> {
    let mut captured = String::new();
    process_data(Some("hello"), |processed| {
        captured = format!("result is: {}", processed);
    })?;
    sink.emit(&captured);
    Ok(())
}

fn run_fetch(sink: &mut dyn OutputSink) -> Result<()> {
    match fetch_data(true) {
        Ok(data) => sink.emit(&format!("fetch ok: {}", data)),
        Err(e) => sink.emit(&format!("fetch error: {}", e)),
    }
    sink.emit("fetch attempt finished");

    match fetch_data(false) {
        Ok(data) => sink.emit(&format!("fetch ok: {}", data)),
        Err(e) => sink.emit(&format!("fetch error: {}", e)),
    }
    sink.emit("fetch attempt finished");
    Ok(())
}

fn run_dates(sink: &mut dyn OutputSink) -> Result<()> {
    // Fixed timestamp keeps the output deterministic.
    let moment: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default();
    sink.emit(&format!(
        "constructed date: {}",
        moment.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    sink.emit(&format!("year: {}", moment.format("%Y")));
    Ok(())
}

type DemoFn = fn(&mut dyn OutputSink) -> Result<()>;

const DEMOS: &[(&str, DemoFn)] = &[
    ("functions", run_functions),
    ("types", run_types),
    ("equality", run_equality),
    ("objects", run_objects),
    ("arrays", run_arrays),
    ("collections", run_collections),
    ("classes", run_classes),
    ("callbacks", run_callbacks),
    ("fetch", run_fetch),
    ("dates", run_dates),
];

pub fn demo_names() -> Vec<&'static str> {
    DEMOS.iter().map(|(name, _)| *name).collect()
}

pub fn is_known_demo(name: &str) -> bool {
    DEMOS.iter().any(|(known, _)| *known == name)
}

pub fn run_demo(name: &str, sink: &mut dyn OutputSink) -> Result<()> {
    let Some((_, demo)) = DEMOS.iter().find(|(known, _)| *known == name) else {
        return Err(SandboxError::UnknownDemo {
            name: name.to_string(),
        });
    };
    demo(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::BufferSink;

    #[test]
    fn test_sum_variants() {
        assert_eq!(sum(2, 2, 10), 40);
        assert_eq!(sum_expr(2, 2, 10), -6);
        assert_eq!(sum_arrow(2, 3, 4), 40);
    }

    #[test]
    fn test_greet_defaults() {
        assert_eq!(greet(None, None), "i am: dulon mahadi. Age goes to: 18");
        assert_eq!(greet(Some("alice"), None), "i am: alice. Age goes to: 18");
    }

    #[test]
    fn test_accumulate_rest() {
        let (head, rest) = accumulate(1, 2, &[3, 4, 5]);
        assert_eq!(head, 3);
        assert_eq!(rest, vec![3, 4, 5]);
    }

    #[test]
    fn test_process_data_fails_fast_on_absent_input() {
        let err = process_data(None, |_| {}).unwrap_err();
        assert!(matches!(err, SandboxError::TypeMismatch { .. }));
    }

    #[test]
    fn test_fetch_data_branches() {
        assert_eq!(fetch_data(true).unwrap(), "data received");
        assert!(matches!(
            fetch_data(false).unwrap_err(),
            SandboxError::FetchFailed { .. }
        ));
    }

    #[test]
    fn test_unknown_demo_is_typed_error() {
        let mut sink = BufferSink::new();
        let err = run_demo("no-such-demo", &mut sink).unwrap_err();
        assert!(matches!(err, SandboxError::UnknownDemo { .. }));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_every_registered_demo_runs() {
        for name in demo_names() {
            let mut sink = BufferSink::new();
            run_demo(name, &mut sink).unwrap();
            assert!(!sink.lines().is_empty(), "demo {} emitted nothing", name);
        }
    }

    #[test]
    fn test_demo_output_is_deterministic() {
        for name in demo_names() {
            let mut first = BufferSink::new();
            let mut second = BufferSink::new();
            run_demo(name, &mut first).unwrap();
            run_demo(name, &mut second).unwrap();
            assert_eq!(first.lines(), second.lines());
        }
    }
}
