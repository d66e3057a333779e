//! Compiled metric catalog.
//!
//! Patterns and post-expressions are compiled once at startup. Extraction of a
//! probe's output is pure: running the command belongs to the caller.

use regex::{Regex, RegexBuilder};

use crate::error::{PiControlError, Result};
use crate::probe::expr::Expr;
use crate::probe::table::{Category, ProbeDef, METRIC_TABLE};
use crate::protocol::{MetricResult, MetricValue};

/// Longest output excerpt quoted in a no-match error.
const EXCERPT_LEN: usize = 80;

#[derive(Debug)]
pub struct CompiledProbe {
    def: ProbeDef,
    names: Vec<&'static str>,
    regex: Regex,
    post: Option<Expr>,
}

impl CompiledProbe {
    pub fn compile(def: &ProbeDef) -> Result<Self> {
        let names: Vec<&'static str> = def.name.split(',').map(str::trim).collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(PiControlError::InvalidConfig(format!(
                "probe {:?} has an empty metric name",
                def.name
            )));
        }

        let regex = RegexBuilder::new(def.pattern)
            .multi_line(def.multiline)
            .build()
            .map_err(|e| {
                PiControlError::InvalidConfig(format!("probe {} pattern: {e}", def.name))
            })?;

        let groups = regex.captures_len() - 1;
        if groups < names.len() {
            return Err(PiControlError::InvalidConfig(format!(
                "probe {} needs {} capture groups, pattern has {groups}",
                def.name,
                names.len()
            )));
        }

        let post = if def.post.trim().is_empty() {
            None
        } else {
            let expr = Expr::parse(def.post).map_err(|e| {
                PiControlError::InvalidConfig(format!("probe {} post: {e}", def.name))
            })?;
            // Multi-value probes bind each value to `$1` in turn.
            let available = if names.len() > 1 { 1 } else { groups };
            if expr.max_capture() > available {
                return Err(PiControlError::InvalidConfig(format!(
                    "probe {} post references ${} but only {available} available",
                    def.name,
                    expr.max_capture()
                )));
            }
            Some(expr)
        };

        Ok(Self {
            def: *def,
            names,
            regex,
            post,
        })
    }

    pub fn command(&self) -> &'static str {
        self.def.command
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn def(&self) -> &ProbeDef {
        &self.def
    }

    /// Turn raw command output into one result per metric name.
    pub fn extract(&self, raw: &str) -> Result<Vec<MetricResult>> {
        // Single-line patterns see the output the way `$` expects: without
        // the final newline most commands print.
        let text = if self.def.multiline {
            raw
        } else {
            raw.strip_suffix('\n').unwrap_or(raw)
        };

        let caps = self.regex.captures(text).ok_or_else(|| {
            PiControlError::NoMatch(format!(
                "{} against {:?}",
                self.def.pattern,
                excerpt(text)
            ))
        })?;

        let groups: Vec<Option<&str>> = caps
            .iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str()))
            .collect();

        if let [name] = self.names.as_slice() {
            let value = match &self.post {
                Some(expr) => expr.eval(&groups)?.into(),
                None => {
                    let text = group(&groups, 0, self.def.pattern)?;
                    MetricValue::coerce(text)
                }
            };
            return Ok(vec![MetricResult::value(*name, value)]);
        }

        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| -> Result<MetricResult> {
                let text = group(&groups, i, self.def.pattern)?;
                let value = match &self.post {
                    Some(expr) => expr.eval(&[Some(text)])?.into(),
                    None => MetricValue::Text(text.to_string()),
                };
                Ok(MetricResult::value(*name, value))
            })
            .collect()
    }

    /// Error results for every name this probe would have produced.
    pub fn failed(&self, err: &PiControlError) -> Vec<MetricResult> {
        self.names
            .iter()
            .map(|name| MetricResult::failed(*name, err))
            .collect()
    }
}

fn group<'a>(groups: &[Option<&'a str>], i: usize, pattern: &str) -> Result<&'a str> {
    groups.get(i).copied().flatten().ok_or_else(|| {
        PiControlError::NoMatch(format!("group {} of {pattern} did not participate", i + 1))
    })
}

fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Debug)]
pub struct CompiledCategory {
    name: &'static str,
    probes: Vec<CompiledProbe>,
}

impl CompiledCategory {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn probes(&self) -> &[CompiledProbe] {
        &self.probes
    }
}

/// Immutable, process-wide probe catalog.
#[derive(Debug)]
pub struct MetricCatalog {
    categories: Vec<CompiledCategory>,
}

impl MetricCatalog {
    /// Compile the built-in table.
    pub fn builtin() -> Result<Self> {
        Self::compile(METRIC_TABLE)
    }

    pub fn compile(table: &[Category]) -> Result<Self> {
        let mut categories = Vec::with_capacity(table.len());
        for c in table {
            if categories.iter().any(|k: &CompiledCategory| k.name == c.name) {
                return Err(PiControlError::InvalidConfig(format!(
                    "duplicate category {}",
                    c.name
                )));
            }
            let probes = c
                .probes
                .iter()
                .map(CompiledProbe::compile)
                .collect::<Result<Vec<_>>>()?;
            categories.push(CompiledCategory {
                name: c.name,
                probes,
            });
        }
        tracing::debug!(categories = categories.len(), "metric catalog compiled");
        Ok(Self { categories })
    }

    pub fn lookup(&self, category: &str) -> Result<&CompiledCategory> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .ok_or_else(|| PiControlError::UnknownCategory(category.to_string()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &CompiledCategory> {
        self.categories.iter()
    }
}
