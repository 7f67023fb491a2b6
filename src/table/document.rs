//! Deserialization of the truth-table JSON document
//!
//! `outputs` is a JSON object whose key order carries meaning (it is the output
//! declaration order), so it is collected with a map visitor into a `Vec`
//! instead of a hash map.

use super::{OutputColumn, TruthTable, TruthTableError};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(super) struct RawDocument {
    inputs: Vec<String>,
    outputs: OrderedOutputs,
}

impl RawDocument {
    pub(super) fn into_table(self) -> Result<TruthTable, TruthTableError> {
        let inputs = self.inputs.into_iter().map(Arc::from).collect();
        let outputs = self
            .outputs
            .0
            .into_iter()
            .map(|(name, bits)| OutputColumn::new(name, bits.into_iter().map(|b| b.0).collect()))
            .collect();
        TruthTable::new(inputs, outputs)
    }
}

#[derive(Debug)]
struct OrderedOutputs(Vec<(String, Vec<Bit>)>);

impl<'de> Deserialize<'de> for OrderedOutputs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OutputsVisitor;

        impl<'de> Visitor<'de> for OutputsVisitor {
            type Value = OrderedOutputs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from output name to a list of 0/1 values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut outputs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, bits)) = map.next_entry::<String, Vec<Bit>>()? {
                    outputs.push((name, bits));
                }
                Ok(OrderedOutputs(outputs))
            }
        }

        deserializer.deserialize_map(OutputsVisitor)
    }
}

/// A single truth-table value, written either as `0`/`1` or `false`/`true`
#[derive(Debug, Clone, Copy)]
struct Bit(bool);

impl<'de> Deserialize<'de> for Bit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BitVisitor;

        impl<'de> Visitor<'de> for BitVisitor {
            type Value = Bit;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("0, 1, false or true")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Bit, E> {
                Ok(Bit(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Bit, E> {
                match v {
                    0 => Ok(Bit(false)),
                    1 => Ok(Bit(true)),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Bit, E> {
                match v {
                    0 => Ok(Bit(false)),
                    1 => Ok(Bit(true)),
                    _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(BitVisitor)
    }
}
