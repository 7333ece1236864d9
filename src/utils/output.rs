use colored::*;
use crate::cli::ListFormat;
use crate::core::data::{Faq, FaqStats};
use crate::utils::error::{handle_flow, FlowResult};
use crate::utils::format::{format_active, format_datetime, truncate_string};
use anyhow::Result;

/// FAQ field types for unified display
enum FaqField {
    Id,
    Question,
    Answer,
    Category,
    Active,
    Updated,
}

pub struct OutputStyle;

impl OutputStyle {
    // Primary colors for different field types
    pub fn question(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn category(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn status(active: bool) -> ColoredString {
        if active {
            format_active(true).green()
        } else {
            format_active(false).dimmed()
        }
    }

    // Formatting helpers
    pub fn separator() -> String {
        "─".repeat(50)
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>12}: {}", Self::label(label), color_fn(value));
    }

    fn print_faq_field(field: FaqField, faq: &Faq) {
        match field {
            FaqField::Id => Self::print_field_colored("ID", &faq.id.to_string(), Self::muted),
            FaqField::Question => Self::print_field_colored("Question", &faq.question, Self::question),
            FaqField::Answer => Self::print_field_colored("Answer", &faq.answer, Self::content),
            FaqField::Category => Self::print_field_colored("Category", &faq.category, Self::category),
            FaqField::Active => println!("{:>12}: {}", Self::label("Active"), Self::status(faq.active)),
            FaqField::Updated => {
                Self::print_field_colored("Updated", &format_datetime(&faq.updated_at), Self::muted)
            }
        }
    }

    pub fn print_faq_detailed(faq: &Faq) {
        println!("{}", Self::title("❓ FAQ Details"));

        Self::print_faq_field(FaqField::Id, faq);
        Self::print_faq_field(FaqField::Question, faq);
        Self::print_faq_field(FaqField::Category, faq);
        Self::print_faq_field(FaqField::Active, faq);
        Self::print_faq_field(FaqField::Updated, faq);

        println!("\n{}:", Self::title("💬 Answer"));
        println!("{}", Self::content(&faq.answer));
    }

    /// Compact block shown before a destructive action
    pub fn print_faq_summary(faq: &Faq) {
        Self::print_faq_field(FaqField::Id, faq);
        Self::print_faq_field(FaqField::Question, faq);
        Self::print_faq_field(FaqField::Answer, faq);
        Self::print_faq_field(FaqField::Category, faq);
        Self::print_faq_field(FaqField::Active, faq);
    }

    /// One line per FAQ for the simple list
    pub fn format_faq_line(faq: &Faq) -> String {
        let marker = if faq.active { " " } else { "✗" };
        format!(
            "{} {} {} {}",
            Self::muted(&format!("{:>4}", faq.id)),
            Self::warning(marker),
            Self::category(&format!("[{}]", faq.category)),
            Self::question(&faq.question)
        )
    }
}

// Utility functions for common patterns
pub fn print_faq_count(count: usize) {
    if count == 0 {
        println!("{}", OutputStyle::muted("No FAQs found."));
    } else {
        println!(
            "❓ {} ({} found)",
            OutputStyle::header("FAQs"),
            OutputStyle::info(&count.to_string())
        );
    }
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

pub fn print_success(message: &str) {
    println!("✅ {}", OutputStyle::success(message));
}

/// Display formatter for different output formats
pub struct DisplayFormatter;

impl DisplayFormatter {
    /// Format FAQ list according to the specified format
    pub fn format_list(faqs: &[Faq], format: &ListFormat) -> Result<()> {
        if faqs.is_empty() {
            handle_flow(FlowResult::EmptyList {
                item_type: "FAQs matching your criteria".to_string(),
            });
            return Ok(());
        }

        match format {
            ListFormat::Simple => Self::print_simple_list(faqs),
            ListFormat::Detailed => Self::print_detailed_list(faqs),
            ListFormat::Table => Self::print_table_list(faqs),
            ListFormat::Json => Self::print_json_list(faqs)?,
        }

        Ok(())
    }

    /// Print categories list
    pub fn print_categories(categories: &[String]) {
        if categories.is_empty() {
            handle_flow(FlowResult::EmptyList {
                item_type: "categories".to_string(),
            });
            return;
        }

        println!("📁 Available Categories ({})", categories.len());
        println!("=========================");
        for category in categories {
            println!("  {}", category);
        }
    }

    pub fn print_stats(stats: &FaqStats) {
        OutputStyle::print_header("📊 FAQ Statistics");
        OutputStyle::print_field_colored("Total", &stats.total.to_string(), OutputStyle::info);
        OutputStyle::print_field_colored("Active", &stats.active.to_string(), OutputStyle::success);
        OutputStyle::print_field_colored("Inactive", &stats.inactive.to_string(), OutputStyle::muted);

        if !stats.category_counts.is_empty() {
            println!("\n{}:", OutputStyle::header("By category"));
            for (category, count) in &stats.category_counts {
                println!("  {:<20} {}", OutputStyle::category(category), count);
            }
        }
    }

    fn print_simple_list(faqs: &[Faq]) {
        print_faq_count(faqs.len());
        println!("{}", OutputStyle::separator());

        for faq in faqs {
            println!("{}", OutputStyle::format_faq_line(faq));
        }
    }

    fn print_detailed_list(faqs: &[Faq]) {
        OutputStyle::print_header("❓ Detailed FAQ List");

        for (i, faq) in faqs.iter().enumerate() {
            println!();
            OutputStyle::print_faq_summary(faq);
            OutputStyle::print_faq_field(FaqField::Updated, faq);

            if i < faqs.len() - 1 {
                println!("{}", OutputStyle::separator());
            }
        }
    }

    fn print_table_list(faqs: &[Faq]) {
        print_faq_count(faqs.len());

        // Column widths in characters
        let id_width = faqs
            .iter()
            .map(|f| f.id.to_string().len())
            .max()
            .unwrap_or(2)
            .max(2);
        let question_width = faqs
            .iter()
            .map(|f| f.question.chars().count())
            .max()
            .unwrap_or(0)
            .clamp(8, 50);
        let category_width = faqs
            .iter()
            .map(|f| f.category.chars().count())
            .max()
            .unwrap_or(0)
            .clamp(8, 20);

        println!(
            "┌─{}─┬─{}─┬─{}─┬─{}─┬─{}─┐",
            "─".repeat(id_width),
            "─".repeat(question_width),
            "─".repeat(category_width),
            "─".repeat(6),
            "─".repeat(19)
        );
        println!(
            "│ {:<id_w$} │ {:<q_w$} │ {:<c_w$} │ {:<6} │ {:^19} │",
            "ID",
            "Question",
            "Category",
            "Active",
            "Updated",
            id_w = id_width,
            q_w = question_width,
            c_w = category_width
        );
        println!(
            "├─{}─┼─{}─┼─{}─┼─{}─┼─{}─┤",
            "─".repeat(id_width),
            "─".repeat(question_width),
            "─".repeat(category_width),
            "─".repeat(6),
            "─".repeat(19)
        );

        for faq in faqs {
            let question = truncate_string(&faq.question, question_width);
            let category = truncate_string(&faq.category, category_width);
            println!(
                "│ {:<id_w$} │ {:<q_w$} │ {:<c_w$} │ {:<6} │ {} │",
                faq.id,
                question,
                category,
                format_active(faq.active),
                format_datetime(&faq.updated_at),
                id_w = id_width,
                q_w = question_width,
                c_w = category_width
            );
        }

        println!(
            "└─{}─┴─{}─┴─{}─┴─{}─┴─{}─┘",
            "─".repeat(id_width),
            "─".repeat(question_width),
            "─".repeat(category_width),
            "─".repeat(6),
            "─".repeat(19)
        );
    }

    fn print_json_list(faqs: &[Faq]) -> Result<()> {
        let json = serde_json::to_string_pretty(faqs)
            .map_err(|e| anyhow::anyhow!("Failed to serialize FAQs to JSON: {}", e))?;
        println!("{}", json);
        Ok(())
    }
}
