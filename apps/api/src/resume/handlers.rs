use std::io::Write;
use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::resume::document::{dotted_extension, DocumentFormat};
use crate::resume::record::ExtractionRecord;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

/// POST /api/resume/parse
///
/// Multipart form with a `file` field (.pdf, .docx or .txt).
/// The upload is staged in a temp file that is removed on every exit path.
pub async fn handle_parse(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionRecord>, AppError> {
    let upload = read_upload(&mut multipart).await?;

    let extension = dotted_extension(Path::new(&upload.file_name));
    DocumentFormat::from_extension(&extension)?;

    // Dropping the guard deletes the file, including on the error paths below.
    let staged = stage_upload(&state.config.upload_dir, &extension, &upload.bytes)?;
    let path = staged.path().to_path_buf();
    info!(
        "Parsing upload '{}' ({} bytes) staged at {}",
        upload.file_name,
        upload.bytes.len(),
        path.display()
    );

    let parser = state.parser;
    let result = tokio::task::spawn_blocking(move || parser.parse(&path))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Parse task failed: {e}")))?;

    if let Err(e) = staged.close() {
        warn!("Failed to remove staged upload: {e}");
    }

    Ok(Json(result?))
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::Validation("No file provided".to_string()))
}

/// Writes the upload to a uniquely named file that keeps the upload's extension,
/// so the parser dispatches on the same format the client declared.
fn stage_upload(dir: &Path, extension: &str, bytes: &[u8]) -> Result<NamedTempFile, AppError> {
    let mut staged = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(extension)
        .tempfile_in(dir)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to stage upload: {e}")))?;

    staged
        .write_all(bytes)
        .and_then(|_| staged.flush())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to stage upload: {e}")))?;

    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::resume::ResumeParser;
    use crate::routes::build_router;

    const BOUNDARY: &str = "resume-test-boundary";

    fn test_state(upload_dir: PathBuf) -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                upload_dir,
                max_upload_bytes: 1024 * 1024,
            },
            parser: ResumeParser::new().unwrap(),
        }
    }

    fn multipart_request(field: &str, file_name: &str, contents: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {contents}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/resume/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_parse_txt_upload() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request("file", "cv.txt", "SKILLS\nPython, Docker, SQL\n\nEnd");
        let (status, body) = send(test_state(dir.path().to_path_buf()), request).await;

        assert_eq!(status, StatusCode::OK);
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert_eq!(body["skills"], serde_json::json!(["Python", "Docker", "SQL"]));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_unsupported_type_is_client_error() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request("file", "cv.rtf", "{\\rtf1}");
        let (status, body) = send(test_state(dir.path().to_path_buf()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
        assert!(body["error"]["message"].as_str().unwrap().contains(".pdf"));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request("attachment", "cv.txt", "SKILLS\nRust");
        let (status, body) = send(test_state(dir.path().to_path_buf()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No file provided");
    }

    #[tokio::test]
    async fn test_empty_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request("file", "", "SKILLS\nRust");
        let (status, body) = send(test_state(dir.path().to_path_buf()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No file selected");
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_server_error_and_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request("file", "cv.docx", "definitely not a zip archive");
        let (status, body) = send(test_state(dir.path().to_path_buf()), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "PARSE_ERROR");
        assert!(dir_is_empty(dir.path()));
    }
}
