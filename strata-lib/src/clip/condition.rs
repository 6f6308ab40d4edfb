//! Host condition predicates carried by clips.

use serde::{Deserialize, Serialize};

/// Condition id reserved for the main loop pickability switch.
pub const MAIN_LOOP_CONDITION: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    #[default]
    Equal,
    Greater,
    Less,
    Range,
}

impl ConditionType {
    /// Map a numeric definition code (`0` equal .. `3` range).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Equal),
            1 => Some(Self::Greater),
            2 => Some(Self::Less),
            3 => Some(Self::Range),
            _ => None,
        }
    }
}

/// Predicate over a single host condition value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i32,
    #[serde(rename = "type", default)]
    pub kind: ConditionType,
    #[serde(default)]
    pub value: i32,
    #[serde(default)]
    pub value2: i32,
}

impl Condition {
    pub fn new(id: i32, kind: ConditionType, value: i32, value2: i32) -> Self {
        Self {
            id,
            kind,
            value,
            value2,
        }
    }

    /// Evaluate the predicate for a host-supplied value.
    pub fn test(&self, value: i32) -> bool {
        match self.kind {
            ConditionType::Equal => value == self.value,
            ConditionType::Greater => value > self.value,
            ConditionType::Less => value < self.value,
            ConditionType::Range => value >= self.value && value <= self.value2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_their_type() {
        assert!(Condition::new(2, ConditionType::Equal, 5, 0).test(5));
        assert!(!Condition::new(2, ConditionType::Equal, 5, 0).test(4));
        assert!(Condition::new(2, ConditionType::Greater, 5, 0).test(6));
        assert!(!Condition::new(2, ConditionType::Greater, 5, 0).test(5));
        assert!(Condition::new(2, ConditionType::Less, 5, 0).test(4));
        assert!(!Condition::new(2, ConditionType::Less, 5, 0).test(5));
    }

    #[test]
    fn range_is_inclusive() {
        let condition = Condition::new(3, ConditionType::Range, 10, 20);
        assert!(condition.test(10));
        assert!(condition.test(20));
        assert!(!condition.test(9));
        assert!(!condition.test(21));
    }

    #[test]
    fn deserializes_type_field() {
        let condition: Condition =
            serde_json::from_str(r#"{"id":7,"type":"range","value":1,"value2":3}"#)
                .expect("condition");
        assert_eq!(condition.kind, ConditionType::Range);
        assert_eq!(ConditionType::from_code(2), Some(ConditionType::Less));
        assert_eq!(ConditionType::from_code(9), None);
    }
}
