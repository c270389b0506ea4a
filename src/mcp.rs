use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::pdf::{document::MetadataUpdate, merge::merge_documents, select_pages};
use crate::pdf::{PdfDocument, PdfError, Rotation};
use crate::ranges::{parse_groups, parse_ranges};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfMergeRequest {
    #[schemars(description = "Paths of the PDF files to merge, in order")]
    pub inputs: Vec<String>,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Range expression (e.g. '1-3,10-12'); each comma group becomes one output file")]
    pub ranges: String,
    #[schemars(description = "Directory for the output files")]
    pub output_dir: String,
    #[schemars(description = "Output file name prefix (default: 'part')")]
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    "part".to_string()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExtractRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Pages to extract (e.g. '2,5-7')")]
    pub pages: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfRotateRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Pages to rotate (e.g. '1-3,7')")]
    pub pages: String,
    #[schemars(description = "Clockwise rotation angle: 90, 180 or 270 (default: 90)")]
    #[serde(default = "default_angle")]
    pub angle: u32,
    #[schemars(description = "Output file path")]
    pub output: String,
}

fn default_angle() -> u32 {
    90
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfMetaSetRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Document title")]
    pub title: Option<String>,
    #[schemars(description = "Document author")]
    pub author: Option<String>,
    #[schemars(description = "Document subject")]
    pub subject: Option<String>,
    #[schemars(description = "Document keywords")]
    pub keywords: Option<String>,
    #[schemars(description = "Output file path")]
    pub output: String,
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
    #[tool(description = "Get PDF metadata including title, author, creator, producer, creation date, and page count")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let info = doc.get_info();
                let result = PdfInfoResult {
                    path,
                    page_count: info.page_count,
                    title: info.title,
                    author: info.author,
                    subject: info.subject,
                    keywords: info.keywords,
                    creator: info.creator,
                    producer: info.producer,
                    creation_date: info.creation_date,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Combine multiple PDFs into a single file, appending pages in input order")]
    fn pdf_merge(&self, Parameters(req): Parameters<PdfMergeRequest>) -> String {
        if req.inputs.is_empty() {
            return "Error: No input files specified".to_string();
        }

        let mut docs = Vec::new();
        for input in &req.inputs {
            match lopdf::Document::load(input) {
                Ok(doc) => docs.push(doc),
                Err(source) => {
                    return format!(
                        "Error: {}",
                        PdfError::Load {
                            path: input.clone(),
                            source
                        }
                    );
                }
            }
        }

        let mut merged = match merge_documents(docs) {
            Ok(doc) => doc,
            Err(e) => return format!("Error: {}", e),
        };
        let page_count = merged.get_pages().len() as u32;

        if let Err(e) = PdfDocument::save(&mut merged, &req.output) {
            return format!("Error: {}", e);
        }

        let result = MergeResult {
            output_path: req.output,
            input_count: req.inputs.len() as u32,
            page_count,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Split a PDF into one output file per comma-separated range group. Use range syntax like '1-3,10-12,20-'.")]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        let total = doc.page_count();

        let groups = match parse_groups(&req.ranges, Some(total)) {
            Ok(g) => g,
            Err(e) => return format!("Error: {}", e),
        };

        let output_dir = std::path::Path::new(&req.output_dir);
        let mut outputs = Vec::new();
        let mut skipped_pages = Vec::new();

        for (position, group) in groups.iter().enumerate() {
            let (selected, skipped) = select_pages(group, total);
            skipped_pages.extend(skipped);
            if selected.is_empty() {
                continue;
            }

            let output_path = output_dir.join(format!("{}_{:02}.pdf", req.prefix, position + 1));

            let mut new_doc = match doc.extract_pages(&selected) {
                Ok(d) => d,
                Err(e) => return format!("Error: {}", e),
            };
            if let Err(e) = PdfDocument::save(&mut new_doc, &output_path) {
                return format!("Error: {}", e);
            }
            outputs.push(SplitPart {
                output_path: output_path.display().to_string(),
                page_count: selected.len() as u32,
            });
        }

        let result = SplitResult {
            outputs,
            skipped_pages,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Extract specific pages from a PDF and save them to a new file. Use page range syntax like '2,5-7'.")]
    fn pdf_extract(&self, Parameters(req): Parameters<PdfExtractRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        let total = doc.page_count();

        let indices = match parse_ranges(&req.pages, Some(total)) {
            Ok(p) => p,
            Err(e) => return format!("Error: {}", e),
        };
        let (selected, skipped_pages) = select_pages(&indices, total);
        if selected.is_empty() {
            return "Error: No pages selected".to_string();
        }

        let mut new_doc = match doc.extract_pages(&selected) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };

        if let Err(e) = PdfDocument::save(&mut new_doc, &req.output) {
            return format!("Error: {}", e);
        }

        let result = ExtractResult {
            output_path: req.output,
            page_count: selected.len() as u32,
            skipped_pages,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Rotate specific pages of a PDF clockwise by 90, 180 or 270 degrees and save the result")]
    fn pdf_rotate(&self, Parameters(req): Parameters<PdfRotateRequest>) -> String {
        let Some(rotation) = Rotation::from_degrees(req.angle) else {
            return format!("Error: Rotation angle must be 90, 180 or 270, got {}", req.angle);
        };

        let mut doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        let total = doc.page_count();

        let indices = match parse_ranges(&req.pages, Some(total)) {
            Ok(p) => p,
            Err(e) => return format!("Error: {}", e),
        };
        let (selected, skipped_pages) = select_pages(&indices, total);
        if selected.is_empty() {
            return "Error: No pages selected".to_string();
        }

        if let Err(e) = doc.rotate_pages(&selected, rotation) {
            return format!("Error: {}", e);
        }
        if let Err(e) = PdfDocument::save(&mut doc.doc, &req.output) {
            return format!("Error: {}", e);
        }

        let result = RotateResult {
            output_path: req.output,
            rotated_pages: selected,
            angle: req.angle,
            skipped_pages,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Set basic metadata fields (title, author, subject, keywords) and save to a new file")]
    fn pdf_meta_set(&self, Parameters(req): Parameters<PdfMetaSetRequest>) -> String {
        let update = MetadataUpdate {
            title: req.title,
            author: req.author,
            subject: req.subject,
            keywords: req.keywords,
        };
        if update.is_empty() {
            return "Error: No metadata fields given".to_string();
        }

        let mut doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        doc.set_info(&update);

        if let Err(e) = PdfDocument::save(&mut doc.doc, &req.output) {
            return format!("Error: {}", e);
        }

        let result = MetaSetResult {
            output_path: req.output,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MergeResult {
    pub output_path: String,
    pub input_count: u32,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitPart {
    pub output_path: String,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub outputs: Vec<SplitPart>,
    pub skipped_pages: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExtractResult {
    pub output_path: String,
    pub page_count: u32,
    pub skipped_pages: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RotateResult {
    pub output_path: String,
    pub rotated_pages: Vec<u32>,
    pub angle: u32,
    pub skipped_pages: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MetaSetResult {
    pub output_path: String,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page manipulation tools. Use pdf_info to get document metadata, pdf_merge \
                 to combine files, pdf_split to cut a document into range groups, pdf_extract to \
                 create a new PDF from a page selection, pdf_rotate to rotate pages, and \
                 pdf_meta_set to update metadata fields."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
