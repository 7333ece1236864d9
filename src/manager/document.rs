// CPF and CEP checks

use anyhow::Result;

use crate::cli::DocumentArgs;
use crate::utils::document::{format_cep, format_cpf, validate_cep, validate_cpf};
use crate::utils::{print_success, print_warning};

pub fn handle_cpf_command(args: &DocumentArgs) -> Result<()> {
    if validate_cpf(&args.value) {
        print_success(&format!("Valid CPF: {}", format_cpf(&args.value)));
    } else {
        print_warning("Invalid CPF.");
    }
    Ok(())
}

pub fn handle_cep_command(args: &DocumentArgs) -> Result<()> {
    if !validate_cep(&args.value) {
        print_warning("Invalid CEP. Use 8 digits, optionally as XXXXX-XXX.");
        return Ok(());
    }
    match format_cep(&args.value) {
        Some(cep) => print_success(&format!("Valid CEP: {}", cep)),
        None => print_warning("Invalid CEP."),
    }
    Ok(())
}
