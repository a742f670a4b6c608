#![doc = "s3-uploader: pick an AWS profile and S3 bucket, stage its contents locally, sync edits back."]

//! All external work is delegated to the `aws` command-line tool; this crate only
//! reads profile names, drives the numbered menus and sequences the subprocess calls.

pub mod aws;
pub mod cli;
pub mod contract;
pub mod flow;
pub mod process;
pub mod profiles;
pub mod select;
pub mod settings;

pub use cli::{run, Cli};
