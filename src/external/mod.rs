//! External posting formats: ingestion adapters that translate a source
//! collaborator's on-disk representation into `(doc_ids[], freqs[])`
//! iterators, keeping the container layer free of format knowledge.

pub mod d2si;
