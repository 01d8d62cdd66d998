//! Hand-rolled multipart encoding for file upload.

use crate::types::FileUpload;

/// Build a `multipart/form-data` body carrying the purpose field and the
/// file part.
pub(super) fn build_file_multipart(boundary: &str, upload: &FileUpload) -> Vec<u8> {
    let mut body = Vec::with_capacity(upload.bytes.len() + 512);

    append_field(&mut body, boundary, "purpose", &upload.purpose);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            upload.filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(&upload.bytes);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    body
}

fn append_field(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_body_carries_purpose_and_file() {
        let upload = FileUpload::new("notes.txt", b"hello".to_vec(), "assistants");
        let body = build_file_multipart("boundary-x", &upload);
        let text = String::from_utf8_lossy(&body);

        assert!(text.contains("name=\"purpose\"\r\n\r\nassistants"));
        assert!(text.contains("filename=\"notes.txt\""));
        assert!(text.contains("hello"));
        assert!(text.ends_with("--boundary-x--\r\n"));
    }
}
