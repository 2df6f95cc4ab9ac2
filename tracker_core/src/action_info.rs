//! Batch processing of raw activity records.
//!
//! Any record type implementing [`DataParser`] can be pushed through
//! [`info`], which parses each line, renders its report and hands the
//! outcome to an [`InfoSink`]. A bad line is reported and skipped; the
//! batch always runs to the end.

use crate::duration::parse_duration;
use crate::{Error, Result};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// A record that can be filled from a raw line and rendered as a report
pub trait DataParser {
    /// Overwrite the record's fields from `datastring`
    ///
    /// On error the record keeps whatever it held before.
    fn parse(&mut self, datastring: &str) -> Result<()>;

    /// Human-readable report for the current fields
    fn action_info(&self) -> Result<String>;
}

/// Step of the driver loop that rejected a record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Parse,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parse => f.write_str("parse"),
            Stage::Report => f.write_str("report"),
        }
    }
}

/// Destination for the outcome of each record
pub trait InfoSink {
    fn report(&mut self, index: usize, info: &str);
    fn error(&mut self, index: usize, stage: Stage, err: &Error);
}

/// Outcome of one record, as collected or serialized by sinks
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InfoEvent {
    Report {
        index: usize,
        message: String,
    },
    Error {
        index: usize,
        stage: Stage,
        message: String,
    },
}

impl InfoEvent {
    pub fn index(&self) -> usize {
        match self {
            InfoEvent::Report { index, .. } | InfoEvent::Error { index, .. } => *index,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, InfoEvent::Error { .. })
    }
}

/// Counts returned by [`info`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfoSummary {
    pub total: usize,
    pub reported: usize,
    pub parse_failures: usize,
    pub report_failures: usize,
}

/// Parse and report every record in `dataset`, in order
pub fn info<I, P, S>(dataset: I, parser: &mut P, sink: &mut S) -> InfoSummary
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    P: DataParser + ?Sized,
    S: InfoSink + ?Sized,
{
    let mut summary = InfoSummary::default();

    for (index, value) in dataset.into_iter().enumerate() {
        let value = value.as_ref();
        summary.total += 1;

        if let Err(e) = parser.parse(value) {
            tracing::debug!(record = index, input = value, "parse failed");
            summary.parse_failures += 1;
            sink.error(index, Stage::Parse, &e);
            continue;
        }

        match parser.action_info() {
            Ok(report) => {
                summary.reported += 1;
                sink.report(index, &report);
            }
            Err(e) => {
                tracing::debug!(record = index, input = value, "report failed");
                summary.report_failures += 1;
                sink.error(index, Stage::Report, &e);
            }
        }
    }

    summary
}

/// Split a record into exactly `N` comma-separated fields
pub(crate) fn split_fields<const N: usize>(datastring: &str) -> Result<[&str; N]> {
    let fields: Vec<&str> = datastring.split(',').collect();
    <[&str; N]>::try_from(fields).map_err(|fields| Error::MalformedInput {
        expected: N,
        found: fields.len(),
    })
}

/// Parse a positive step count
pub(crate) fn parse_steps(raw: &str) -> Result<u32> {
    let steps: i64 = raw
        .parse()
        .map_err(|_| Error::InvalidSteps(format!("{:?} is not an integer", raw)))?;

    if steps <= 0 {
        return Err(Error::InvalidSteps(format!("steps must be > 0, got {}", steps)));
    }

    u32::try_from(steps).map_err(|_| Error::InvalidSteps(format!("{} is out of range", steps)))
}

/// Parse a duration spec that must be strictly positive
pub(crate) fn parse_positive_duration(raw: &str) -> Result<TimeDelta> {
    let duration = parse_duration(raw)?;
    if duration <= TimeDelta::zero() {
        return Err(Error::InvalidDuration(format!(
            "duration must be > 0, got {:?}",
            raw
        )));
    }
    Ok(duration)
}

// ============================================================================
// Sinks
// ============================================================================

impl InfoSink for Vec<InfoEvent> {
    fn report(&mut self, index: usize, info: &str) {
        self.push(InfoEvent::Report {
            index,
            message: info.to_string(),
        });
    }

    fn error(&mut self, index: usize, stage: Stage, err: &Error) {
        self.push(InfoEvent::Error {
            index,
            stage,
            message: err.to_string(),
        });
    }
}

/// Sink that logs reports at INFO and errors at WARN
#[derive(Debug, Default)]
pub struct TracingSink;

impl InfoSink for TracingSink {
    fn report(&mut self, index: usize, info: &str) {
        tracing::info!(record = index, "\n{}", info.trim_end());
    }

    fn error(&mut self, index: usize, stage: Stage, err: &Error) {
        tracing::warn!(record = index, %stage, "{}", err);
    }
}

/// Plain-text sink: reports verbatim, errors as `error: record N (stage): ...` lines
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.writer.write_all(text.as_bytes()) {
            tracing::warn!("Failed to write record output: {}", e);
        }
    }
}

impl<W: Write> InfoSink for WriterSink<W> {
    fn report(&mut self, _index: usize, info: &str) {
        self.emit(info);
        self.emit("\n");
    }

    fn error(&mut self, index: usize, stage: Stage, err: &Error) {
        self.emit(&format!("error: record {} ({}): {}\n", index + 1, stage, err));
    }
}

/// JSON Lines sink: one [`InfoEvent`] object per line
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, event: &InfoEvent) {
        let written = serde_json::to_string(event)
            .map_err(Error::from)
            .and_then(|line| {
                self.writer.write_all(line.as_bytes())?;
                self.writer.write_all(b"\n")?;
                Ok(())
            });
        if let Err(e) = written {
            tracing::warn!("Failed to write record {}: {}", event.index(), e);
        }
    }
}

impl<W: Write> InfoSink for JsonlSink<W> {
    fn report(&mut self, index: usize, info: &str) {
        self.emit(&InfoEvent::Report {
            index,
            message: info.to_string(),
        });
    }

    fn error(&mut self, index: usize, stage: Stage, err: &Error) {
        self.emit(&InfoEvent::Error {
            index,
            stage,
            message: err.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DaySteps, Profile, Training};

    fn profile() -> Profile {
        Profile::new("Гоша", 84.6, 1.87)
    }

    #[test]
    fn test_batch_continues_past_failures() {
        crate::logging::init_test();

        let dataset = ["678,0h50m", "0,0h50m", "678,0h50m,extra", "1000,1h"];
        let mut events: Vec<InfoEvent> = Vec::new();
        let summary = info(dataset, &mut DaySteps::new(profile()), &mut events);

        assert_eq!(
            summary,
            InfoSummary {
                total: 4,
                reported: 2,
                parse_failures: 2,
                report_failures: 0,
            }
        );
        let indices: Vec<usize> = events.iter().map(InfoEvent::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(!events[0].is_error());
        assert!(events[1].is_error());
        assert!(events[2].is_error());
        assert!(!events[3].is_error());
    }

    #[test]
    fn test_report_failures_are_counted() {
        let dataset = ["3456,Бег,0h45m", "1000,Плавание,1h", "500,Ходьба,10m"];
        let mut events: Vec<InfoEvent> = Vec::new();
        let summary = info(dataset, &mut Training::new(profile()), &mut events);

        assert_eq!(summary.reported, 2);
        assert_eq!(summary.report_failures, 1);
        match &events[1] {
            InfoEvent::Error { stage, message, .. } => {
                assert_eq!(*stage, Stage::Report);
                assert!(message.contains("unknown training type"));
            }
            other => panic!("Expected error event, got {:?}", other),
        }
    }

    #[test]
    fn test_error_events_name_their_stage() {
        let dataset = ["0,Бег,1h", "1000,Плавание,1h", "1000,Бег,1h"];
        let mut events: Vec<InfoEvent> = Vec::new();
        let summary = info(
            dataset,
            &mut Training::new(Profile::new("x", 0.0, 1.8)),
            &mut events,
        );

        assert_eq!(summary.parse_failures, 1);
        assert_eq!(summary.report_failures, 2);
        let stages: Vec<Option<Stage>> = events
            .iter()
            .map(|e| match e {
                InfoEvent::Error { stage, .. } => Some(*stage),
                InfoEvent::Report { .. } => None,
            })
            .collect();
        assert_eq!(
            stages,
            vec![Some(Stage::Parse), Some(Stage::Report), Some(Stage::Report)]
        );
    }

    #[test]
    fn test_tracing_sink_consumes_batch() {
        crate::logging::init_test();

        let mut sink = TracingSink;
        let summary = info(
            ["3456,Бег,0h45m", "1000,Плавание,1h", "bad"],
            &mut Training::new(profile()),
            &mut sink,
        );

        assert_eq!(summary.total, 3);
        assert_eq!(summary.reported, 1);
        assert_eq!(summary.report_failures, 1);
        assert_eq!(summary.parse_failures, 1);
    }

    #[test]
    fn test_driver_accepts_trait_objects() {
        let mut parsers: Vec<(Box<dyn DataParser>, Vec<&str>)> = vec![
            (Box::new(Training::new(profile())), vec!["3456,Бег,0h45m"]),
            (Box::new(DaySteps::new(profile())), vec!["678,0h50m"]),
        ];

        let mut events: Vec<InfoEvent> = Vec::new();
        for (parser, dataset) in parsers.iter_mut() {
            info(dataset.iter(), &mut **parser, &mut events);
        }

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| !e.is_error()));
    }

    #[test]
    fn test_empty_dataset() {
        let mut events: Vec<InfoEvent> = Vec::new();
        let dataset: [&str; 0] = [];
        let summary = info(dataset, &mut DaySteps::new(profile()), &mut events);
        assert_eq!(summary, InfoSummary::default());
        assert!(events.is_empty());
    }

    #[test]
    fn test_writer_sink_output() {
        let mut sink = WriterSink::new(Vec::new());
        info(["678,0h50m", "x,0h50m"], &mut DaySteps::new(profile()), &mut sink);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("Количество шагов: 678.\n"));
        assert!(output.contains("error: record 2 (parse): invalid steps"));
    }

    #[test]
    fn test_jsonl_sink_output() {
        let mut sink = JsonlSink::new(Vec::new());
        info(
            ["678,0h50m", "678", "678,0h50m"],
            &mut DaySteps::new(Profile::new("x", 84.6, 0.0)),
            &mut sink,
        );

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let events: Vec<InfoEvent> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            InfoEvent::Error { index: 0, stage: Stage::Report, message } if message.contains("height")
        ));
        assert!(matches!(
            &events[1],
            InfoEvent::Error { index: 1, stage: Stage::Parse, message } if message.contains("expected 2 fields")
        ));
        assert!(output.lines().nth(1).unwrap().contains(r#""stage":"parse""#));
        assert!(output.lines().next().unwrap().contains(r#""stage":"report""#));
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields::<2>("a,b").unwrap(), ["a", "b"]);
        assert_eq!(split_fields::<3>("a,,b").unwrap(), ["a", "", "b"]);
        assert!(matches!(
            split_fields::<2>(""),
            Err(Error::MalformedInput { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_steps("678").unwrap(), 678);
        assert_eq!(parse_steps("+5").unwrap(), 5);
        for raw in ["0", "-1", "", " 5", "1.5", "99999999999"] {
            assert!(matches!(parse_steps(raw), Err(Error::InvalidSteps(_))), "{:?}", raw);
        }
    }
}
