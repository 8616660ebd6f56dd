//! The trace command: copy input lines into a trace sink.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use owo_colors::OwoColorize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use bmtrace_core::{Closer, Printer, Sanitizer, TraceSetting, TraceSink};

/// Options for [`run_trace`].
#[derive(Debug, Clone)]
pub struct TraceOptions {
    pub setting: TraceSetting,
    pub raw: bool,
    pub stats: bool,
    pub inputs: Vec<PathBuf>,
}

/// Per-rule redaction totals, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionTotals {
    pub counts: Vec<(String, usize)>,
}

impl RedactionTotals {
    fn for_sanitizer(sanitizer: &Sanitizer) -> Self {
        let counts = sanitizer
            .compiled_rules()
            .rules
            .iter()
            .map(|rule| (rule.name.clone(), 0))
            .collect();
        Self { counts }
    }

    fn add(&mut self, rule_name: &str, occurrences: usize) {
        if let Some((_, total)) = self.counts.iter_mut().find(|(name, _)| name == rule_name) {
            *total += occurrences;
        }
    }
}

/// Builds the sink, traces every input, then closes the sink.
///
/// The sink is closed even when an input fails; the input error wins.
pub fn run_trace(opts: TraceOptions) -> Result<()> {
    info!("Tracing {} input(s) to {}", opts.inputs.len().max(1), opts.setting);
    let sink = TraceSink::new(&opts.setting);
    let sanitizer = Sanitizer::builtin();
    let mut totals = RedactionTotals::for_sanitizer(sanitizer);

    let traced = trace_inputs(&sink, sanitizer, &opts, &mut totals);
    let closed = sink.close().context("Failed to close trace sink");
    traced?;
    closed?;

    if opts.stats {
        let stdout = io::stdout();
        let color = stdout.is_terminal();
        print_totals(&totals, &mut stdout.lock(), color)?;
    }
    Ok(())
}

fn trace_inputs(
    sink: &dyn Printer,
    sanitizer: &Sanitizer,
    opts: &TraceOptions,
    totals: &mut RedactionTotals,
) -> Result<()> {
    if opts.inputs.is_empty() {
        return trace_reader(io::stdin().lock(), sink, sanitizer, opts, totals)
            .context("Failed to read from stdin");
    }
    for input in &opts.inputs {
        if input == Path::new("-") {
            trace_reader(io::stdin().lock(), sink, sanitizer, opts, totals)
                .context("Failed to read from stdin")?;
        } else {
            let file = File::open(input)
                .with_context(|| format!("Failed to open input file: {}", input.display()))?;
            trace_reader(BufReader::new(file), sink, sanitizer, opts, totals)
                .with_context(|| format!("Failed to read input file: {}", input.display()))?;
        }
    }
    Ok(())
}

/// Traces one reader line by line. Invalid UTF-8 is replaced, not rejected.
pub fn trace_reader<R: BufRead>(
    reader: R,
    sink: &dyn Printer,
    sanitizer: &Sanitizer,
    opts: &TraceOptions,
    totals: &mut RedactionTotals,
) -> io::Result<()> {
    let mut lines = 0usize;
    for line in reader.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        if opts.raw {
            sink.println(&[&line]);
        } else {
            let (clean, summary) = sanitizer.sanitize_with_summary(&line);
            for item in &summary {
                totals.add(&item.rule_name, item.occurrences);
            }
            sink.println(&[&clean]);
        }
        lines += 1;
    }
    debug!("Traced {} line(s).", lines);
    Ok(())
}

/// Writes the per-rule totals as `rule: count` lines.
pub fn print_totals<W: Write>(totals: &RedactionTotals, out: &mut W, color: bool) -> io::Result<()> {
    for (name, count) in &totals.counts {
        if color {
            writeln!(out, "{}: {}", name.cyan(), count.bold())?;
        } else {
            writeln!(out, "{}: {}", name, count)?;
        }
    }
    Ok(())
}
