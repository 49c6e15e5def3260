// HTTP shell around the scoring core: multipart/JSON handlers and PDF text extraction.
// Input validation (empty job description, non-PDF uploads) happens here, never in the core.

pub mod handlers;
pub mod pdf;
