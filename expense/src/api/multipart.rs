use crate::api::error::ApiError;
use crate::domain::models::{ExpenseForm, Upload};
use actix_multipart::Multipart;
use futures::StreamExt;

const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;
pub const RECEIPT_FIELD: &str = "receipt";

/// Reads the expense form. `day` is accepted but ignored, the server derives it.
pub async fn read_expense_form(
    mut payload: Multipart,
    max_receipt_bytes: usize,
) -> Result<ExpenseForm, ApiError> {
    let mut form = ExpenseForm::default();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|err| ApiError::bad_request(format!("Invalid form data: {err}")))?;
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let is_receipt = name == RECEIPT_FIELD;
        let limit = if is_receipt {
            max_receipt_bytes
        } else {
            MAX_TEXT_FIELD_BYTES
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| ApiError::bad_request(format!("Invalid form data: {err}")))?;
            if data.len() + chunk.len() > limit {
                return Err(ApiError::bad_request(if is_receipt {
                    "Receipt file is too large"
                } else {
                    "Form field is too large"
                }));
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "date" => form.date = text(data)?,
            "amount" => form.amount = text(data)?,
            "place" => form.place = text(data)?,
            RECEIPT_FIELD => {
                let file_name = file_name.unwrap_or_default();
                // Browsers send an empty file part when nothing was chosen.
                if !(file_name.is_empty() && data.is_empty()) {
                    form.receipt = Some(Upload { file_name, data });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn text(data: Vec<u8>) -> Result<String, ApiError> {
    String::from_utf8(data).map_err(|_| ApiError::bad_request("Invalid form data: fields must be UTF-8"))
}
