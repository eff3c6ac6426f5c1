//! SAX-style traversal.

use crate::num::Number;
use crate::value::{Shape, Value};

/// Receives the events of [`Value::accept`].
///
/// `int` and `uint` are emitted for integers that fit 32 bits; by default
/// they forward to `int64` and `uint64`.
pub trait Handler {
    type Error;

    fn null(&mut self) -> Result<(), Self::Error>;

    fn bool(&mut self, value: bool) -> Result<(), Self::Error>;

    fn int(&mut self, value: i32) -> Result<(), Self::Error> {
        self.int64(i64::from(value))
    }

    fn uint(&mut self, value: u32) -> Result<(), Self::Error> {
        self.uint64(u64::from(value))
    }

    fn int64(&mut self, value: i64) -> Result<(), Self::Error>;

    fn uint64(&mut self, value: u64) -> Result<(), Self::Error>;

    fn double(&mut self, value: f64) -> Result<(), Self::Error>;

    fn string(&mut self, value: &str) -> Result<(), Self::Error>;

    fn start_object(&mut self) -> Result<(), Self::Error>;

    fn key(&mut self, name: &str) -> Result<(), Self::Error>;

    fn end_object(&mut self, member_count: usize) -> Result<(), Self::Error>;

    fn start_array(&mut self) -> Result<(), Self::Error>;

    fn end_array(&mut self, element_count: usize) -> Result<(), Self::Error>;
}

impl Value {
    /// Walks the value depth first. Cached children are visited in place of
    /// the backing nodes, so overlay writes show up in the event stream.
    pub fn accept<H: Handler + ?Sized>(&self, handler: &mut H) -> Result<(), H::Error> {
        match self.shape() {
            Shape::Null => handler.null(),
            Shape::Bool(b) => handler.bool(b),
            Shape::Number(number) => emit_number(handler, number),
            Shape::String(s) => handler.string(&s),
            Shape::Array(children) => {
                handler.start_array()?;
                for child in &children {
                    child.accept(handler)?;
                }
                handler.end_array(children.len())
            }
            Shape::Object(members) => {
                handler.start_object()?;
                for (name, child) in &members {
                    handler.key(name)?;
                    child.accept(handler)?;
                }
                handler.end_object(members.len())
            }
        }
    }
}

fn emit_number<H: Handler + ?Sized>(handler: &mut H, number: Number) -> Result<(), H::Error> {
    match number {
        Number::Int(i) => match i32::try_from(i) {
            Ok(narrow) => handler.int(narrow),
            Err(_) => handler.int64(i),
        },
        Number::Uint(u) => match u32::try_from(u) {
            Ok(narrow) => handler.uint(narrow),
            Err(_) => handler.uint64(u),
        },
        Number::Double(d) => handler.double(d),
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Handler for Recorder {
        type Error = Infallible;

        fn null(&mut self) -> Result<(), Infallible> {
            self.events.push("null".into());
            Ok(())
        }

        fn bool(&mut self, value: bool) -> Result<(), Infallible> {
            self.events.push(format!("bool:{value}"));
            Ok(())
        }

        fn int(&mut self, value: i32) -> Result<(), Infallible> {
            self.events.push(format!("int:{value}"));
            Ok(())
        }

        fn uint(&mut self, value: u32) -> Result<(), Infallible> {
            self.events.push(format!("uint:{value}"));
            Ok(())
        }

        fn int64(&mut self, value: i64) -> Result<(), Infallible> {
            self.events.push(format!("int64:{value}"));
            Ok(())
        }

        fn uint64(&mut self, value: u64) -> Result<(), Infallible> {
            self.events.push(format!("uint64:{value}"));
            Ok(())
        }

        fn double(&mut self, value: f64) -> Result<(), Infallible> {
            self.events.push(format!("double:{value}"));
            Ok(())
        }

        fn string(&mut self, value: &str) -> Result<(), Infallible> {
            self.events.push(format!("string:{value}"));
            Ok(())
        }

        fn start_object(&mut self) -> Result<(), Infallible> {
            self.events.push("{".into());
            Ok(())
        }

        fn key(&mut self, name: &str) -> Result<(), Infallible> {
            self.events.push(format!("key:{name}"));
            Ok(())
        }

        fn end_object(&mut self, member_count: usize) -> Result<(), Infallible> {
            self.events.push(format!("}}{member_count}"));
            Ok(())
        }

        fn start_array(&mut self) -> Result<(), Infallible> {
            self.events.push("[".into());
            Ok(())
        }

        fn end_array(&mut self, element_count: usize) -> Result<(), Infallible> {
            self.events.push(format!("]{element_count}"));
            Ok(())
        }
    }

    /// Only the required methods; narrow integers reach the 64-bit ones.
    struct Wide(Vec<String>);

    impl Handler for Wide {
        type Error = Infallible;

        fn null(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
        fn bool(&mut self, _: bool) -> Result<(), Infallible> {
            Ok(())
        }
        fn int64(&mut self, value: i64) -> Result<(), Infallible> {
            self.0.push(format!("int64:{value}"));
            Ok(())
        }
        fn uint64(&mut self, value: u64) -> Result<(), Infallible> {
            self.0.push(format!("uint64:{value}"));
            Ok(())
        }
        fn double(&mut self, _: f64) -> Result<(), Infallible> {
            Ok(())
        }
        fn string(&mut self, _: &str) -> Result<(), Infallible> {
            Ok(())
        }
        fn start_object(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
        fn key(&mut self, _: &str) -> Result<(), Infallible> {
            Ok(())
        }
        fn end_object(&mut self, _: usize) -> Result<(), Infallible> {
            Ok(())
        }
        fn start_array(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
        fn end_array(&mut self, _: usize) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[rstest::rstest]
    fn test_event_order_and_counts() {
        let value = Value::from(vec![
            ("a".to_string(), Value::from(vec![Value::null(), Value::from(true)])),
            ("b".to_string(), Value::from("s")),
        ]);
        let mut recorder = Recorder::default();
        value.accept(&mut recorder).unwrap();
        assert_eq!(
            recorder.events,
            vec!["{", "key:a", "[", "null", "bool:true", "]2", "key:b", "string:s", "}2"]
        );
    }

    #[rstest::rstest]
    #[case(Value::from(-5), "int:-5")]
    #[case(Value::from(5), "int:5")]
    #[case(Value::from(5u64), "uint:5")]
    #[case(Value::from(i64::MIN), "int64:-9223372036854775808")]
    #[case(Value::from(u64::MAX), "uint64:18446744073709551615")]
    #[case(Value::from(0.5), "double:0.5")]
    fn test_integer_narrowing(#[case] value: Value, #[case] expected: &str) {
        let mut recorder = Recorder::default();
        value.accept(&mut recorder).unwrap();
        assert_eq!(recorder.events, vec![expected.to_string()]);
    }

    #[rstest::rstest]
    fn test_default_narrow_methods_forward() {
        let value = Value::from(vec![Value::from(-1), Value::from(7u32)]);
        let mut wide = Wide(Vec::new());
        value.accept(&mut wide).unwrap();
        assert_eq!(wide.0, vec!["int64:-1", "uint64:7"]);
    }

    #[rstest::rstest]
    fn test_overlay_wins_during_traversal() {
        let mut value = Value::from(vec![("x".to_string(), Value::from(1))]);
        value["x"] = Value::from(42);
        let mut recorder = Recorder::default();
        value.accept(&mut recorder).unwrap();
        assert_eq!(recorder.events, vec!["{", "key:x", "int:42", "}1"]);
    }
}
