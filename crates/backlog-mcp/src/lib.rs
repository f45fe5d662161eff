//! MCP server for the Backlog issue tracker.
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes
//! read-only Backlog data (issues, comments, attachments, shared files) to AI
//! assistants like Claude.
//!
//! # Architecture
//!
//! The server uses the `rmcp` crate for MCP protocol handling. Tools are
//! registered in a [`ToolRegistry`](registry::ToolRegistry); each one validates
//! its arguments, makes a single call through
//! [`BacklogClient`](backlog_api::BacklogClient), and returns the result as a
//! text content envelope.
//!
//! # Tools
//!
//! - `get_issue` - Issue details
//! - `get_issue_comments` - Comments, with optional id range, count and order
//! - `get_issue_attachments` - Attachment metadata
//! - `get_issue_attachment` - Download one attachment (base64 preview)
//! - `get_issue_shared_files` - Shared files linked to the issue

pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod server;
pub mod tools;

pub use config::ServerArgs;
pub use error::{Error, Result};
pub use server::BacklogMcpServer;
