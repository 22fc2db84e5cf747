pub mod mft;
pub mod usnjrnl;
