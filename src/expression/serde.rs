use std::{fmt, marker::PhantomData};

use serde::{de, de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

use crate::data_type::DataType;
use crate::Expr;

/// Expressions are serialized as the text they have been parsed from.
impl<T: DataType> Serialize for Expr<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.unparse())
    }
}

/// Deserialization parses strictly, i.e., any diagnostic turns into an error.
impl<'de, T: DataType> Deserialize<'de> for Expr<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ExprVisitor { dummy: PhantomData })
    }
}

#[derive(Debug)]
struct ExprVisitor<T> {
    dummy: PhantomData<T>,
}

impl<'de, T: DataType> Visitor<'de> for ExprVisitor<T> {
    type Value = Expr<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a string that can be parsed by the `plotex` crate")
    }

    fn visit_str<E>(self, unparsed: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Expr::parse_strict(unparsed).map_err(|err| E::custom(format!("Parse error - {}", err)))
    }
}

#[cfg(test)]
use {crate::sample::SampleConfig, serde_test::Token};

#[test]
fn test_ser_de() {
    let test = |s: &'static str, x: f64| {
        let expr = Expr::<f64>::parse_strict(s).unwrap();
        serde_test::assert_tokens(&expr, &[Token::Str(s)]);
        let serialized = serde_json::to_string(&expr).unwrap();
        let deserialized = serde_json::from_str::<Expr<f64>>(serialized.as_str()).unwrap();
        assert_eq!(s, format!("{}", deserialized));
        assert_eq!(expr.eval(x).to_bits(), deserialized.eval(x).to_bits());
    };
    test("x+2.0*x", 1.5);
    test("sin(x)^2 + cos(x)^2", 0.3);
    test("-x^2/(1+x)", 4.0);
}

#[test]
fn test_de_invalid() {
    let res = serde_json::from_str::<Expr<f64>>("\"2@3\"");
    let msg = format!("{}", res.unwrap_err());
    assert!(msg.contains("invalid character '@'"));
    assert!(serde_json::from_str::<Expr<f64>>("3").is_err());
}

#[test]
fn test_ser_de_diagnostics_and_config() {
    let (_, diagnostics) = Expr::<f64>::parse("(x");
    let serialized = serde_json::to_string(&diagnostics).unwrap();
    let deserialized = serde_json::from_str::<crate::Diagnostics>(&serialized).unwrap();
    assert_eq!(diagnostics, deserialized);

    let config: SampleConfig =
        serde_json::from_str(r#"{"x_min": -1.0, "x_max": 1.0, "step": 0.5}"#).unwrap();
    assert_eq!(config.xs().count(), 5);
}
