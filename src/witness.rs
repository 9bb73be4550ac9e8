//! Witness collection from the interactive input stream.

use std::io::{BufRead, Write};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::WorkflowResult;

/// A value assigned to one circuit input signal.
///
/// Malformed numeric input is not rejected here: it becomes the
/// `NotANumber` sentinel and is forwarded into the witness, so the proving
/// engine stays the single source of truth for witness validity and the
/// failure surfaces at proof-generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalValue {
    Num(i64),
    NotANumber,
}

impl SignalValue {
    /// Parse a raw input line. Non-numeric, empty, and overflowing input
    /// all yield the sentinel.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => SignalValue::Num(n),
            Err(_) => SignalValue::NotANumber,
        }
    }
}

impl Serialize for SignalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SignalValue::Num(n) => serializer.serialize_i64(*n),
            SignalValue::NotANumber => serializer.serialize_str("NaN"),
        }
    }
}

/// An ordered mapping from circuit input signal names to values.
///
/// Immutable once built; serializes to the JSON object the proving engine
/// expects, preserving insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness {
    signals: Vec<(String, SignalValue)>,
}

impl Witness {
    pub fn new() -> Self {
        Witness {
            signals: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: SignalValue) {
        self.signals.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<SignalValue> {
        self.signals
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SignalValue)> {
        self.signals.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

impl Default for Witness {
    fn default() -> Self {
        Witness::new()
    }
}

impl Serialize for Witness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.signals.len()))?;
        for (name, value) in &self.signals {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Prompts for each declared circuit input signal in a fixed order and
/// builds the witness.
pub struct WitnessCollector<'a> {
    signals: &'a [&'a str],
}

impl<'a> WitnessCollector<'a> {
    /// Create a collector for the given signal set.
    pub fn new(signals: &'a [&'a str]) -> Self {
        WitnessCollector { signals }
    }

    /// Collect one value per signal. Collection itself cannot fail on bad
    /// values; only stream I/O errors are errors. EOF reads as an empty
    /// line, which parses to the not-a-number sentinel.
    pub fn collect<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> WorkflowResult<Witness> {
        let mut witness = Witness::new();
        for name in self.signals {
            write!(output, "Enter {name}: ")?;
            output.flush()?;
            let line = read_trimmed_line(input)?;
            witness.push(*name, SignalValue::parse(&line));
        }
        Ok(witness)
    }
}

/// Read one line and strip the trailing line terminator, nothing more.
/// Interior whitespace is preserved, so " y" stays " y".
pub(crate) fn read_trimmed_line<R: BufRead>(input: &mut R) -> std::io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
