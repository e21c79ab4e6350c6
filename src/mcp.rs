use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::commands::{self, EditOutcome};
use crate::error;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfDeleteRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "1-based pages to delete (e.g., '1, 3, 5-8')")]
    pub pages: String,
    #[schemars(description = "Output file path (default: <name>_deleted.pdf next to the source)")]
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfMergeRequest {
    #[schemars(description = "PDF files to merge, in output order (at least two)")]
    pub inputs: Vec<String>,
    #[schemars(description = "Output file path (default: merged_document.pdf next to the first input)")]
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfInsertRequest {
    #[schemars(description = "Path to the PDF to insert into")]
    pub base: String,
    #[schemars(description = "Path to the PDF whose pages are inserted")]
    pub injected: String,
    #[schemars(
        description = "Page number the first inserted page will have (1 = front, page count + 1 = end)"
    )]
    pub position: String,
    #[schemars(description = "Output file path (default: <base>_inserted.pdf next to the base)")]
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Delete pages from a PDF and save the remaining pages to a new file")]
    fn pdf_delete_pages(&self, Parameters(req): Parameters<PdfDeleteRequest>) -> String {
        let output = req.output.map(PathBuf::from);
        render(
            "delete",
            commands::delete::run(Path::new(&req.path), &req.pages, output.as_deref()),
        )
    }

    #[tool(description = "Merge two or more PDFs into one file, keeping the given order")]
    fn pdf_merge(&self, Parameters(req): Parameters<PdfMergeRequest>) -> String {
        let inputs: Vec<PathBuf> = req.inputs.into_iter().map(PathBuf::from).collect();
        let output = req.output.map(PathBuf::from);
        render("merge", commands::merge::run(&inputs, output.as_deref()))
    }

    #[tool(description = "Insert every page of one PDF into another at a 1-based page position")]
    fn pdf_insert(&self, Parameters(req): Parameters<PdfInsertRequest>) -> String {
        let output = req.output.map(PathBuf::from);
        render(
            "insert",
            commands::insert::run(
                Path::new(&req.base),
                Path::new(&req.injected),
                &req.position,
                output.as_deref(),
            ),
        )
    }
}

fn render(action: &str, result: error::Result<EditOutcome>) -> String {
    match result {
        Ok(outcome) => {
            let result = EditResult {
                output_path: outcome.output_path.display().to_string(),
                page_count: outcome.page_count,
            };
            serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
        }
        Err(e) => {
            warn!(error = %e, "{} failed", action);
            format!("Error: {}", e)
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct EditResult {
    pub output_path: String,
    pub page_count: u32,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page editing tools. Use pdf_delete_pages to drop pages by range \
                 (e.g. '1, 3, 5-8'), pdf_merge to concatenate files in order, and pdf_insert \
                 to splice one PDF into another at a page position. Each tool writes a new \
                 file and returns its path and page count."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();
    info!("starting MCP server on stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
