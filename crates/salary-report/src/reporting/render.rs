//! Console rendering of the summary tables.

use crate::error::Result;
use crate::types::PipelineResult;
use std::io::{IsTerminal, Write};

/// Writes the three summaries in a human-readable form.
pub trait SummaryRenderer {
    fn render(&self, result: &PipelineResult, out: &mut dyn Write) -> Result<()>;
}

/// Boxed polars tables, for interactive terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl SummaryRenderer for TableRenderer {
    fn render(&self, result: &PipelineResult, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Department Summary")?;
        writeln!(out, "{}", result.department_frame()?)?;
        writeln!(out)?;
        writeln!(out, "Job Title Summary")?;
        writeln!(out, "{}", result.job_title_frame()?)?;
        writeln!(out)?;
        writeln!(out, "Highest Paid per Department")?;
        writeln!(out, "{}", result.highest_paid_frame()?)?;
        Ok(())
    }
}

/// One line per row, for pipes and log files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl SummaryRenderer for PlainRenderer {
    fn render(&self, result: &PipelineResult, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "# Department Summary")?;
        for row in &result.department_summary {
            writeln!(
                out,
                "{}: avg {:.2}, total {:.2}, employees {}",
                row.department, row.avg_salary, row.total_salary, row.employee_count
            )?;
        }

        writeln!(out, "# Job Title Summary")?;
        for row in &result.job_title_summary {
            writeln!(
                out,
                "{}: avg {:.2}, highest {:.2}",
                row.job_title, row.avg_salary, row.highest_paid
            )?;
        }

        writeln!(out, "# Highest Paid per Department")?;
        for row in &result.highest_paid {
            writeln!(
                out,
                "{}: {} ({}) {:.2}",
                row.department,
                row.name.as_deref().unwrap_or("-"),
                row.employee_id.as_deref().unwrap_or("-"),
                row.salary
            )?;
        }
        Ok(())
    }
}

/// Tables on a terminal, plain lines otherwise or when `force_plain` is set.
pub fn select_renderer(force_plain: bool) -> Box<dyn SummaryRenderer> {
    if !force_plain && std::io::stdout().is_terminal() {
        Box::new(TableRenderer)
    } else {
        Box::new(PlainRenderer)
    }
}
