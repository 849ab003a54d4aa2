// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_derive::Deserialize;
use thiserror::Error;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::BufReader;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("no benchmark data to plot")]
    NoData,
    #[error("benchmarks must have exactly one parameter, but found none")]
    MissingParameter,
    #[error("benchmarks must have exactly one parameter, but found multiple: {0:?}")]
    AmbiguousParameter(Vec<String>),
    #[error("benchmarks must all have the same parameter name, but found: {0:?}")]
    InconsistentParameterName(Vec<String>),
    #[error("files must all have the same parameter name, but found {established:?} vs. {found:?}")]
    ParameterMismatch { established: String, found: String },
    #[error("parameter value for {name:?} is not numeric: {value:?}")]
    NonNumericParameter { name: String, value: String },
    #[error("unable to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("unable to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// One parsed benchmark-results file.
#[derive(Clone, Debug, Deserialize)]
pub struct Document {
    results: Vec<Entry>,
}

impl Document {
    pub fn results(&self) -> &[Entry] {
        &self.results
    }
}

/// One measured configuration: the swept parameter plus timing statistics.
/// Unrelated fields emitted by the benchmarking tool are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    parameters: BTreeMap<String, ParameterValue>,
    mean: f64,
    stddev: f64,
}

impl Entry {
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }
}

/// A swept parameter value. Benchmarking tools emit these either as JSON
/// numbers or as strings holding a numeric literal.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    Text(String),
}

impl ParameterValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(v) => Some(*v),
            ParameterValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParameterValue::Number(v) => write!(f, "{}", v),
            ParameterValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Returns the entry's unique `(name, value)` parameter pair.
pub fn unique_parameter(entry: &Entry) -> Result<(&str, &ParameterValue), ResultsError> {
    if entry.parameters.len() > 1 {
        return Err(ResultsError::AmbiguousParameter(
            entry.parameters.keys().cloned().collect(),
        ));
    }
    match entry.parameters.iter().next() {
        Some((name, value)) => Ok((name.as_str(), value)),
        None => Err(ResultsError::MissingParameter),
    }
}

/// Returns the parameter name shared by all entries and the per-entry
/// values in entry order.
pub fn extract_parameters(
    entries: &[Entry],
) -> Result<(String, Vec<ParameterValue>), ResultsError> {
    if entries.is_empty() {
        return Err(ResultsError::NoData);
    }

    let mut names = BTreeSet::new();
    let mut values = Vec::with_capacity(entries.len());
    for entry in entries {
        let (name, value) = unique_parameter(entry)?;
        names.insert(name.to_string());
        values.push(value.clone());
    }

    let mut names: Vec<String> = names.into_iter().collect();
    if names.len() != 1 {
        return Err(ResultsError::InconsistentParameterName(names));
    }
    Ok((names.remove(0), values))
}

/// The errorbar series contributed by one input file: parallel,
/// entry-ordered vectors of parameter values, means, and stddevs.
#[derive(Clone, Debug)]
pub struct Series {
    parameter: String,
    values: Vec<f64>,
    means: Vec<f64>,
    stddevs: Vec<f64>,
}

impl Series {
    pub fn from_document(doc: &Document) -> Result<Series, ResultsError> {
        let (parameter, raw) = extract_parameters(doc.results())?;

        let mut values = Vec::with_capacity(raw.len());
        for value in &raw {
            match value.as_f64() {
                Some(v) => values.push(v),
                None => {
                    return Err(ResultsError::NonNumericParameter {
                        name: parameter,
                        value: value.to_string(),
                    });
                }
            }
        }

        let means = doc.results().iter().map(|e| e.mean()).collect();
        let stddevs = doc.results().iter().map(|e| e.stddev()).collect();

        Ok(Series {
            parameter,
            values,
            means,
            stddevs,
        })
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stddevs(&self) -> &[f64] {
        &self.stddevs
    }

    /// `(value, mean, stddev)` triples in entry order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.values
            .iter()
            .zip(self.means.iter())
            .zip(self.stddevs.iter())
            .map(|((&v, &m), &s)| (v, m, s))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Loads one benchmark-results file and derives its series.
pub fn load(path: &str) -> Result<Series, ResultsError> {
    let file = File::open(path).map_err(|source| ResultsError::Read {
        path: path.to_string(),
        source,
    })?;
    let doc: Document =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ResultsError::Parse {
            path: path.to_string(),
            source,
        })?;
    Series::from_document(&doc)
}

/// Accumulates per-file series and holds the parameter name established by
/// the first file, which every later file must match.
#[derive(Clone, Debug, Default)]
pub struct Sweep {
    parameter: Option<String>,
    series: Vec<Series>,
}

impl Sweep {
    pub fn new() -> Sweep {
        Default::default()
    }

    pub fn push(&mut self, series: Series) -> Result<(), ResultsError> {
        match &self.parameter {
            Some(established) => {
                if *established != series.parameter {
                    return Err(ResultsError::ParameterMismatch {
                        established: established.clone(),
                        found: series.parameter,
                    });
                }
            }
            None => {
                self.parameter = Some(series.parameter.clone());
            }
        }
        self.series.push(series);
        Ok(())
    }

    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }
}
