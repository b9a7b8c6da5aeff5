use crate::parser::operator::CompareOp;
use crate::runtime::Value;
use crate::runtime::errors::{EvalResult, EvalError, ErrorKind};


/// Compare two scalar payloads. Nil on either side is always false.
pub fn compare_values(op: CompareOp, lhs: &Value, rhs: &Value) -> EvalResult<bool> {
    let result = match (lhs, rhs) {
        (Value::Nil, _) | (_, Value::Nil) => false,

        (Value::Bool(a), Value::Bool(b)) => eval_compare(op, a, b),
        (Value::Integer(a), Value::Integer(b)) => eval_compare(op, a, b),
        (Value::UInteger(a), Value::UInteger(b)) => eval_compare(op, a, b),
        (Value::Float32(a), Value::Float32(b)) => eval_compare(op, a, b),
        (Value::Float(a), Value::Float(b)) => eval_compare(op, a, b),

        (Value::String(..), Value::String(..)) => {
            let message = format!("cannot apply '{}' to strings", op);
            return Err(EvalError::new(ErrorKind::UnsupportedType, message));
        }

        (lhs, rhs) => {
            let message = format!("cannot compare {} with {}", lhs.type_tag(), rhs.type_tag());
            return Err(EvalError::new(ErrorKind::TypeMismatch, message));
        }
    };

    Ok(result)
}

// NaN compares unequal and unordered, as with the native operators
fn eval_compare<T>(op: CompareOp, lhs: &T, rhs: &T) -> bool where T: PartialOrd {
    match op {
        CompareOp::EQ => lhs == rhs,
        CompareOp::NE => lhs != rhs,
        CompareOp::GE => lhs >= rhs,
        CompareOp::GT => lhs > rhs,
        CompareOp::LE => lhs <= rhs,
        CompareOp::LT => lhs < rhs,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OPS: [CompareOp; 6] = [
        CompareOp::EQ, CompareOp::NE,
        CompareOp::GE, CompareOp::GT,
        CompareOp::LE, CompareOp::LT,
    ];

    #[test]
    fn integer_ordering() {
        let (a, b) = (Value::Integer(-3), Value::Integer(7));
        let results = ALL_OPS.map(|op| compare_values(op, &a, &b).unwrap());
        assert_eq!(results, [false, true, false, false, true, true]);
    }

    #[test]
    fn bool_ordering() {
        let (a, b) = (Value::Bool(true), Value::Bool(false));
        let results = ALL_OPS.map(|op| compare_values(op, &a, &b).unwrap());
        assert_eq!(results, [false, true, true, true, false, false]);
    }

    #[test]
    fn float_ordering() {
        let (a, b) = (Value::Float(2.5), Value::Float(2.5));
        let results = ALL_OPS.map(|op| compare_values(op, &a, &b).unwrap());
        assert_eq!(results, [true, false, true, false, true, false]);

        let (a, b) = (Value::Float32(1.0), Value::Float32(0.5));
        assert!(compare_values(CompareOp::GT, &a, &b).unwrap());
    }

    #[test]
    fn unsigned_ordering() {
        let (a, b) = (Value::UInteger(u64::MAX), Value::UInteger(1));
        assert!(compare_values(CompareOp::GT, &a, &b).unwrap());
        assert!(!compare_values(CompareOp::EQ, &a, &b).unwrap());
    }

    #[test]
    fn nil_is_always_false() {
        for op in ALL_OPS {
            assert!(!compare_values(op, &Value::Nil, &Value::Integer(1)).unwrap());
            assert!(!compare_values(op, &Value::Bool(true), &Value::Nil).unwrap());
            assert!(!compare_values(op, &Value::Nil, &Value::Nil).unwrap());
        }
    }

    #[test]
    fn mixed_types_are_rejected() {
        let error = compare_values(CompareOp::EQ, &Value::Integer(1), &Value::Float(1.0)).unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::TypeMismatch);

        let error = compare_values(CompareOp::LT, &Value::Bool(true), &Value::Integer(1)).unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::TypeMismatch);
    }

    #[test]
    fn strings_are_unsupported() {
        let error = compare_values(CompareOp::EQ, &Value::from("a"), &Value::from("a")).unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::UnsupportedType);
    }
}
