//! Contact form command.

use std::io::Write;

use mrseafarm_storefront::contact::ContactForm;

use super::CommandError;

/// Validate `form` and print the message body that would be sent.
pub fn submit(out: &mut impl Write, form: &ContactForm) -> Result<(), CommandError> {
    match form.validate() {
        Ok(message) => {
            tracing::info!(email = %message.email, "contact message accepted");
            writeln!(out, "{}", message.to_plain_text())?;
            Ok(())
        }
        Err(errors) => {
            let details: Vec<String> = errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect();
            Err(CommandError::Invalid(details.join("; ")))
        }
    }
}
