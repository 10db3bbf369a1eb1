use clap::{ArgAction, Parser};
use blob_transform::{
    BatchRequest, BatchResponse, Engine, EngineConfig, InvokeResult, OpArgs, Operation, Payload,
    generate_execution_id, init_logging, read_blob, write_blob,
};
use std::fs;
use std::io::{self, Read};
use tracing::info;

/// Apply byte-level operations to a binary blob
#[derive(Parser, Debug)]
#[command(name = "blob-transform")]
#[command(version = "0.1.0")]
#[command(about = "Hex editing, checksums, diffs and bit-expansion for binary blobs", long_about = None)]
struct Args {
    /// Binary file to mount
    #[arg(short, long)]
    file: String,

    /// JSON file containing the operation batch (omit to read from stdin)
    #[arg(long)]
    ops: Option<String>,

    /// Output structured JSON instead of human-readable
    #[arg(short, long)]
    json: bool,

    /// Write the report to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Write the final buffer (or transcoded stream) to this file
    #[arg(short = 'x', long)]
    export: Option<String>,

    /// Bit-expand the file into --export instead of running a batch
    #[arg(long)]
    transcode: bool,

    /// JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the number of undo snapshots kept
    #[arg(long)]
    history_capacity: Option<usize>,

    /// Override the default dump length in bytes
    #[arg(long)]
    dump_length: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

/// Build the engine config from the optional file plus CLI overrides
fn load_config(args: &Args) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(capacity) = args.history_capacity {
        config.history_capacity = capacity;
    }
    if let Some(length) = args.dump_length {
        config.dump_length = length;
    }
    config.validate()?;
    Ok(config)
}

/// Read BatchRequest from file path or stdin
fn read_batch_request(path: Option<&String>) -> Result<BatchRequest, Box<dyn std::error::Error>> {
    let json_str = if let Some(p) = path {
        fs::read_to_string(p)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let request: BatchRequest = serde_json::from_str(&json_str)?;
    Ok(request)
}

fn run_transcode(args: &Args) {
    let Some(export) = args.export.as_ref() else {
        eprintln!("Error: --transcode requires --export");
        std::process::exit(2);
    };

    let bytes = match read_blob(&args.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let expanded = Engine::transcode(&bytes);
    if let Err(e) = write_blob(export, &expanded) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!(input = bytes.len(), output = expanded.len(), "transcoded");
    println!(
        "Transcoded 0x{:X} bytes into 0x{:X} bytes",
        bytes.len(),
        expanded.len()
    );
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.log_json);

    if args.transcode {
        run_transcode(&args);
        return;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let batch = match read_batch_request(args.ops.as_ref()) {
        Ok(req) => req,
        Err(e) => {
            eprintln!("Error reading operation batch: {}", e);
            std::process::exit(1);
        }
    };

    let execution_id = if batch.execution_id == "auto" {
        generate_execution_id()
    } else {
        batch.execution_id.clone()
    };

    let bytes = match read_blob(&args.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            let response = BatchResponse::failure(
                execution_id,
                format!("Failed to read file '{}': {}", args.file, e),
            );
            output_response(&response, args.json, args.output.as_ref());
            std::process::exit(1);
        }
    };

    let engine = Engine::new(config);
    let session = engine.mount(&bytes);
    info!(%execution_id, %session, ops = batch.operations.len(), "running batch");

    let results: Vec<InvokeResult> = batch
        .operations
        .iter()
        .map(|req| engine.invoke(&req.op, &req.args))
        .collect();

    if let Some(path) = args.export.as_ref() {
        let saved = engine.invoke(Operation::Save.name(), &OpArgs::new());
        let written = saved
            .binary()
            .map(|bytes| write_blob(path, bytes));
        if let Some(Err(e)) = written {
            eprintln!("Failed to export buffer: {}", e);
            std::process::exit(1);
        }
    }

    let (final_length, final_fingerprint) = engine
        .with_session(|s| (s.buffer().len(), s.buffer().fingerprint()))
        .unwrap_or_default();

    let response = BatchResponse::new(execution_id, results, final_length, final_fingerprint);
    output_response(&response, args.json, args.output.as_ref());

    if !response.success {
        std::process::exit(1);
    }
}

/// Format and output the response
fn output_response(response: &BatchResponse, json_mode: bool, output_path: Option<&String>) {
    let output = if json_mode {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| {
            r#"{"error": "Failed to serialize response"}"#.to_string()
        })
    } else if let Some(error) = &response.error {
        format!("Error: {}", error)
    } else {
        human_report(response)
    };

    if let Some(path) = output_path {
        if let Err(e) = fs::write(path, &output) {
            eprintln!("Failed to write output to '{}': {}", path, e);
            std::process::exit(1);
        }
    } else {
        println!("{}", output);
    }
}

fn human_report(response: &BatchResponse) -> String {
    let mut lines = Vec::new();
    for (i, result) in response.results.iter().enumerate() {
        let marker = if result.ok { "ok" } else { "error" };
        lines.push(format!("[{}] {}: {}", i + 1, marker, result.status_message));

        // reports worth reading in full
        if let Some(
            payload @ (Payload::Text { .. }
            | Payload::Matches { .. }
            | Payload::Checksums { .. }
            | Payload::Diff { .. }),
        ) = &result.payload
        {
            let text = payload.text();
            if !text.is_empty() {
                lines.push(text);
            }
        }
    }

    lines.push(format!(
        "Applied {} operation(s), {} failed",
        response.applied_count, response.failed_count
    ));
    lines.push(format!("Final length: 0x{:X}", response.final_length));
    lines.push(format!("Final fingerprint: {}", response.final_fingerprint));
    lines.join("\n")
}
