// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Line-oriented text format for [Graphs](Graph).
//!
//! Every non-empty line is a single record, fields are separated by whitespace,
//! and everything after a `#` is ignored:
//!
//! ```text
//! # meters per map-fraction unit
//! scale 1250
//!
//! # node <id> <x> <y>
//! node 1 0.10 0.20
//! node 2 0.40 0.20
//! node 3 0.40 0.90
//!
//! # edge <a> <b>
//! edge 1 2
//!
//! # way <id> <id> ... - consecutive nodes are adjacent
//! way 2 3
//! ```
//!
//! Records may appear in any order; edges and ways may reference nodes
//! which are declared later (or never - such references are ignored by the search).

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;
use std::str::FromStr;

use crate::{Graph, Model, Node};

/// Error which can occur when reading a [Graph].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {error}")]
    Syntax { line: usize, error: SyntaxError },
}

/// Problem with a single line of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("unknown record type: {0:?}")]
    UnknownRecord(String),

    #[error("{record}: expected {expected} fields, got {got}")]
    FieldCount {
        record: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("value out of range: {0:?}")]
    InvalidValue(String),

    #[error("node ids must not be zero")]
    ZeroId,
}

/// Reads a [Graph] from a file at the provided path.
pub fn read_graph_from_file<P: AsRef<Path>>(path: P) -> Result<Graph, LoadError> {
    let f = File::open(path)?;
    read_graph(io::BufReader::new(f))
}

/// Reads a [Graph] from a buffered reader.
pub fn read_graph<R: BufRead>(reader: R) -> Result<Graph, LoadError> {
    let mut g = Graph::default();
    let mut edges: usize = 0;
    let mut ways: usize = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let fields = line
            .split('#')
            .next()
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>();

        if let Err(error) = add_record(&mut g, &fields) {
            return Err(LoadError::Syntax {
                line: idx + 1,
                error,
            });
        }

        match fields.first() {
            Some(&"edge") => edges += 1,
            Some(&"way") => ways += 1,
            _ => {}
        }
    }

    log::debug!(
        "loaded {} nodes, {} edges and {} ways",
        g.len(),
        edges,
        ways
    );
    Ok(g)
}

fn add_record(g: &mut Graph, fields: &[&str]) -> Result<(), SyntaxError> {
    let Some((&record, args)) = fields.split_first() else {
        return Ok(());
    };

    match record {
        "scale" => {
            check_field_count("scale", "1", args.len() == 1, args.len())?;
            let scale: f32 = parse(args[0])?;
            if !scale.is_finite() || scale <= 0.0 {
                return Err(SyntaxError::InvalidValue(args[0].to_string()));
            }
            g.set_metric_scale(scale);
        }

        "node" => {
            check_field_count("node", "3", args.len() == 3, args.len())?;
            let id = parse_id(args[0])?;
            g.set_node(Node {
                id,
                x: parse_coordinate(args[1])?,
                y: parse_coordinate(args[2])?,
            });
        }

        "edge" => {
            check_field_count("edge", "2", args.len() == 2, args.len())?;
            g.add_way([parse_id(args[0])?, parse_id(args[1])?]);
        }

        "way" => {
            check_field_count("way", "at least 2", args.len() >= 2, args.len())?;
            let nodes = args
                .iter()
                .map(|&arg| parse_id(arg))
                .collect::<Result<Vec<_>, _>>()?;
            g.add_way(nodes);
        }

        _ => return Err(SyntaxError::UnknownRecord(record.to_string())),
    }

    Ok(())
}

fn check_field_count(
    record: &'static str,
    expected: &'static str,
    ok: bool,
    got: usize,
) -> Result<(), SyntaxError> {
    if ok {
        Ok(())
    } else {
        Err(SyntaxError::FieldCount {
            record,
            expected,
            got,
        })
    }
}

fn parse<T: FromStr>(field: &str) -> Result<T, SyntaxError> {
    field
        .parse()
        .map_err(|_| SyntaxError::InvalidNumber(field.to_string()))
}

fn parse_coordinate(field: &str) -> Result<f32, SyntaxError> {
    let value: f32 = parse(field)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SyntaxError::InvalidValue(field.to_string()))
    }
}

fn parse_id(field: &str) -> Result<i64, SyntaxError> {
    match parse(field)? {
        0 => Err(SyntaxError::ZeroId),
        id => Ok(id),
    }
}
