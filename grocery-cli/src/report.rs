use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use grocery_core::constants::EMPTY_LIST_LABEL;
use grocery_core::{
    Notification, NotificationLevel, Season, StoreView, VendorView, ViewBody, fmt_currency,
};

/// Everything a report renders, gathered once from the session.
#[derive(Debug, Serialize)]
pub struct PrintJob<'a> {
    pub season: Season,
    pub notifications: &'a [Notification],
    pub stores: Vec<StoreView<'a>>,
    /// Present only for the all-store print.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<BudgetTotals>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BudgetTotals {
    pub planned_budget_cents: u64,
    pub estimated_budget_cents: u64,
}

pub fn generate_console_report<W: Write + ?Sized>(out: &mut W, job: &PrintJob<'_>) -> Result<()> {
    for note in job.notifications {
        let line = format!("{}: {}", note.title, note.description);
        match note.level {
            NotificationLevel::Success => writeln!(out, "✅ {}", line.green())?,
            NotificationLevel::Warning => writeln!(out, "⚠️  {}", line.yellow())?,
            NotificationLevel::Error => writeln!(out, "❌ {}", line.red())?,
        }
    }
    if !job.notifications.is_empty() {
        writeln!(out)?;
    }

    for view in &job.stores {
        writeln!(out, "{}", view.name.bright_cyan().bold())?;
        writeln!(out, "{}", "=".repeat(view.name.chars().count()).cyan())?;
        if let Some(logo) = view.logo {
            writeln!(out, "{}", logo.dimmed())?;
        }
        writeln!(out, "Season: {}", view.season)?;
        writeln!(out, "Budget: {}", fmt_currency(view.total_budget_cents).green())?;
        match &view.body {
            ViewBody::Flat {
                regular_items,
                seasonal_items,
            } => {
                write_console_list(out, "Regular Items:", regular_items, "")?;
                write_console_list(
                    out,
                    &format!("{} Items:", view.season),
                    seasonal_items,
                    "",
                )?;
            }
            ViewBody::Composite { vendors } => {
                for vendor in vendors {
                    write_console_vendor(out, vendor, view.season)?;
                }
            }
        }
        writeln!(out)?;
    }

    if let Some(totals) = job.totals {
        writeln!(
            out,
            "{} {} of estimated {}",
            "Planned budget:".bold(),
            fmt_currency(totals.planned_budget_cents),
            fmt_currency(totals.estimated_budget_cents)
        )?;
    }
    Ok(())
}

fn write_console_vendor<W: Write + ?Sized>(
    out: &mut W,
    vendor: &VendorView<'_>,
    season: Season,
) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  {} {} (Budget: {})",
        vendor.emoji,
        vendor.name.bold(),
        fmt_currency(vendor.budget_cents)
    )?;
    write_console_list(out, "Regular Items:", vendor.regular_items, "  ")?;
    write_console_list(
        out,
        &format!("{season} Items:"),
        vendor.seasonal_items,
        "  ",
    )?;
    Ok(())
}

fn write_console_list<W: Write + ?Sized>(
    out: &mut W,
    heading: &str,
    items: &[String],
    indent: &str,
) -> Result<()> {
    writeln!(out, "{indent}{}", heading.bold())?;
    if items.is_empty() {
        writeln!(out, "{indent}  {}", EMPTY_LIST_LABEL.italic().dimmed())?;
    }
    for item in items {
        writeln!(out, "{indent}  • {item}")?;
    }
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(out: &mut W, job: &PrintJob<'_>) -> Result<()> {
    writeln!(out, "# Grocery List ({})\n", job.season)?;

    if !job.notifications.is_empty() {
        for note in job.notifications {
            writeln!(out, "> **{}**: {}", note.title, note.description)?;
        }
        writeln!(out)?;
    }

    for view in &job.stores {
        writeln!(out, "## {}\n", view.name)?;
        writeln!(out, "- **Season**: {}", view.season)?;
        writeln!(out, "- **Budget**: {}\n", fmt_currency(view.total_budget_cents))?;
        match &view.body {
            ViewBody::Flat {
                regular_items,
                seasonal_items,
            } => {
                write_markdown_list(out, "Regular Items", regular_items)?;
                write_markdown_list(out, &format!("{} Items", view.season), seasonal_items)?;
            }
            ViewBody::Composite { vendors } => {
                for vendor in vendors {
                    writeln!(
                        out,
                        "### {} {} ({})\n",
                        vendor.emoji,
                        vendor.name,
                        fmt_currency(vendor.budget_cents)
                    )?;
                    write_markdown_list(out, "Regular Items", vendor.regular_items)?;
                    write_markdown_list(
                        out,
                        &format!("{} Items", view.season),
                        vendor.seasonal_items,
                    )?;
                }
            }
        }
    }

    if let Some(totals) = job.totals {
        writeln!(
            out,
            "**Planned budget**: {} of estimated {}",
            fmt_currency(totals.planned_budget_cents),
            fmt_currency(totals.estimated_budget_cents)
        )?;
    }
    Ok(())
}

fn write_markdown_list<W: Write + ?Sized>(out: &mut W, heading: &str, items: &[String]) -> Result<()> {
    writeln!(out, "**{heading}**\n")?;
    if items.is_empty() {
        writeln!(out, "_{EMPTY_LIST_LABEL}_")?;
    }
    for item in items {
        writeln!(out, "- {item}")?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(out: &mut W, job: &PrintJob<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, job)?;
    writeln!(out)?;
    Ok(())
}
