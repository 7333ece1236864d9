// CRUD operations - Create, Read, Update, Delete

use anyhow::Result;

use crate::cli::{AddArgs, DeleteArgs, ShowArgs, UpdateArgs};
use crate::core::data::{Faq, FaqInput, FaqPatch};
use crate::core::operations::{DeleteOutcome, FaqOperations, StatusChange};
use crate::store::Backend;
use crate::utils::{self, handle_flow, report_error, report_on_err, AppError, FlowResult, OutputStyle};

fn not_found(id: i64) {
    handle_flow(FlowResult::NotFound {
        item_type: "FAQ".to_string(),
        search_term: id.to_string(),
    });
}

fn cancelled() {
    handle_flow(FlowResult::Cancelled("Operation cancelled".to_string()));
}

/// Blank answers mean "keep the current value"
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

// Create operations
pub fn handle_add_command(ops: &mut FaqOperations<Backend>, args: &AddArgs) -> Result<()> {
    let question = match &args.question {
        Some(q) => q.clone(),
        None => utils::prompt_input(&format!("{}: ", OutputStyle::label("Question")))?,
    };

    let answer = match &args.answer {
        Some(a) => a.clone(),
        None => utils::prompt_input(&format!("{}: ", OutputStyle::label("Answer")))?,
    };

    let category = match &args.category {
        Some(c) => c.clone(),
        None => {
            let Some(existing) = report_on_err(ops.list_categories()) else {
                return Ok(());
            };
            let prompt = format!("{}: ", OutputStyle::label("Category"));
            match utils::prompt_input_with_autocomplete(&prompt, &existing)? {
                Some(category) => category,
                None => {
                    cancelled();
                    return Ok(());
                }
            }
        }
    };

    let active = match args.active {
        Some(active) => active,
        None => utils::prompt_active("Active")?.unwrap_or(1),
    };

    match ops.add(FaqInput::new(question, answer, active, category)) {
        Ok(id) => handle_flow(FlowResult::Success(format!("FAQ {} registered.", id))),
        Err(e) => report_error(&e),
    }

    Ok(())
}

// Read operations
pub fn handle_show_command(ops: &FaqOperations<Backend>, args: &ShowArgs) -> Result<()> {
    match report_on_err(ops.find_by_id(args.id)) {
        Some(Some(faq)) => OutputStyle::print_faq_detailed(&faq),
        Some(None) => not_found(args.id),
        None => {}
    }
    Ok(())
}

/// Ask for each field, showing the current value. Blank input, or Esc
/// at the category prompt, keeps a field as it is.
fn prompt_patch(current: &Faq, categories: &[String]) -> Result<FaqPatch> {
    OutputStyle::print_faq_summary(current);
    println!("{}", OutputStyle::muted("Leave a field blank to keep its value."));

    let question = utils::prompt_input(&format!("{}: ", OutputStyle::label("New question")))?;
    let answer = utils::prompt_input(&format!("{}: ", OutputStyle::label("New answer")))?;
    let category = utils::prompt_input_with_autocomplete(
        &format!("{}: ", OutputStyle::label("New category")),
        categories,
    )?;
    let active = utils::prompt_active("Active")?;

    Ok(build_patch(question, answer, category, active))
}

/// `category` is `None` when the prompt was left with Esc
fn build_patch(
    question: String,
    answer: String,
    category: Option<String>,
    active: Option<i64>,
) -> FaqPatch {
    FaqPatch {
        question: non_blank(question),
        answer: non_blank(answer),
        active,
        category: category.and_then(non_blank),
    }
}

// Update operations
pub fn handle_update_command(ops: &mut FaqOperations<Backend>, args: &UpdateArgs) -> Result<()> {
    let patch = if args.has_field_flags() {
        FaqPatch {
            question: args.question.clone(),
            answer: args.answer.clone(),
            active: args.active,
            category: args.category.clone(),
        }
    } else {
        let Some(found) = report_on_err(ops.find_by_id(args.id)) else {
            return Ok(());
        };
        let Some(current) = found else {
            not_found(args.id);
            return Ok(());
        };
        let Some(categories) = report_on_err(ops.list_categories()) else {
            return Ok(());
        };
        prompt_patch(&current, &categories)?
    };

    if patch.is_empty() {
        handle_flow(FlowResult::Cancelled("Nothing to change".to_string()));
        return Ok(());
    }

    // A bare status toggle reports whether anything changed
    if let (Some(active), true) = (
        patch.active,
        patch.question.is_none() && patch.answer.is_none() && patch.category.is_none(),
    ) {
        match ops.set_active(args.id, active) {
            Ok(StatusChange::Changed) => {
                handle_flow(FlowResult::Success(format!("FAQ {} status updated.", args.id)))
            }
            Ok(StatusChange::Unchanged) => {
                println!("{}", OutputStyle::muted("Status unchanged."))
            }
            Ok(StatusChange::NotFound) => not_found(args.id),
            Err(e) => report_error(&e),
        }
        return Ok(());
    }

    match ops.update_fields(args.id, patch) {
        Ok(true) => handle_flow(FlowResult::Success(format!("FAQ {} updated.", args.id))),
        Ok(false) => not_found(args.id),
        Err(e) => report_error(&e),
    }

    Ok(())
}

// Delete operations
pub fn handle_delete_command(ops: &mut FaqOperations<Backend>, args: &DeleteArgs) -> Result<()> {
    let must_confirm = !args.force || ops.repository().requires_delete_confirmation();

    if !must_confirm {
        match ops.delete(args.id) {
            Ok(true) => handle_flow(FlowResult::Success(format!("FAQ {} deleted.", args.id))),
            Ok(false) => not_found(args.id),
            Err(e) => report_error(&e),
        }
        return Ok(());
    }

    let outcome = ops.delete_with_confirmation(args.id, |faq| {
        println!("FAQ to delete:");
        OutputStyle::print_faq_summary(faq);
        utils::prompt_confirm_or_cancel("\nDelete this FAQ?")
            .map_err(|e| AppError::Io(e.to_string()))
    });

    match outcome {
        Ok(DeleteOutcome::Deleted(faq)) => {
            handle_flow(FlowResult::Success(format!("FAQ {} deleted.", faq.id)))
        }
        Ok(DeleteOutcome::Cancelled) => {
            handle_flow(FlowResult::Cancelled("FAQ not deleted".to_string()))
        }
        Ok(DeleteOutcome::NotFound) => not_found(args.id),
        Err(e) => report_error(&e),
    }

    Ok(())
}
