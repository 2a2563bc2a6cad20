use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use tracing::warn;
use uuid::Uuid;

use crate::{assets::Upload, error::AppError};

/// Text fields and file parts of a form submission.
///
/// Accepts `multipart/form-data` and `application/x-www-form-urlencoded`.
#[derive(Debug, Default)]
pub struct FormPayload {
    fields: HashMap<String, String>,
    uploads: HashMap<String, Upload>,
}

impl FormPayload {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn upload(&self, name: &str) -> Option<&Upload> {
        self.uploads.get(name)
    }

    pub fn required(&self, name: &str) -> Result<&str, AppError> {
        self.field(name)
            .ok_or_else(|| AppError::BadRequest(format!("{name} is required")))
    }

    pub fn id(&self, name: &str) -> Result<Uuid, AppError> {
        let raw = self.required(name)?;
        Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::BadRequest(format!("{name} is not a valid id")))
    }

    #[cfg(test)]
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            uploads: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_upload(mut self, name: &str, upload: Upload) -> Self {
        self.uploads.insert(name.to_string(), upload);
        self
    }

    /// A file part that cannot be read leaves the body unusable, so reading
    /// stops there: the part is recorded as [`Upload::Failed`] and only the
    /// parts before it are kept.
    async fn from_multipart(mut mp: Multipart) -> Result<Self, AppError> {
        let mut payload = FormPayload::default();
        loop {
            let field = match mp.next_field().await {
                Ok(Some(f)) => f,
                Ok(None) => break,
                Err(e) => return Err(AppError::BadRequest(e.to_string())),
            };
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => match field.bytes().await {
                    // browsers send an empty unnamed part for an untouched file input
                    Ok(bytes) if bytes.is_empty() && file_name.is_empty() => {}
                    Ok(bytes) => {
                        payload.uploads.insert(name, Upload::Received(bytes));
                    }
                    Err(e) => {
                        warn!(part = %name, error = %e, "failed to read file part; ignoring the rest of the form");
                        payload.uploads.insert(name, Upload::Failed(e.to_string()));
                        break;
                    }
                },
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    payload.fields.insert(name, text);
                }
            }
        }
        Ok(payload)
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let mp = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            return Self::from_multipart(mp).await;
        }

        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(Self {
            fields,
            uploads: HashMap::new(),
        })
    }
}
