use copypasta_ext::prelude::*;

use crate::errors::AppError;

pub fn copy_to_clipboard(password: &str) -> Result<(), AppError> {
    let mut ctx = copypasta_ext::try_context()
        .ok_or_else(|| AppError::Clipboard(String::from("no clipboard available")))?;

    ctx.set_contents(password.to_string())
        .map_err(|e| AppError::Clipboard(e.to_string()))?;

    log::info!("password copied to clipboard");

    Ok(())
}
