use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use parking_lot::Mutex;
use tracing::info;

use latte::capture::{self, pcap_source::bpf_filter, PcapSource, SegmentSource};
use latte::config::Config;
use latte::metrics::progress;
use latte::{shutdown, Session};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    println!();
    println!("╔══════════════════════════════════════════════════╗");
    println!("║   ☕  LATTE: OPENFLOW LATENCY OBSERVATORY         ║");
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    // ── 1. Validate configuration & set up logging ───────────────
    if let Err(e) = config.validate() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    println!("{}", serde_json::to_string_pretty(&config).unwrap_or_default());
    println!("BPF filter: {}", bpf_filter(config.ofport));

    // ── 2. Build the session ─────────────────────────────────────
    let session = Session::new(
        config.scenario.build(),
        config.late_threshold_ns(),
        &config.histogram(),
    )
    .unwrap_or_else(|e| {
        eprintln!("❌ Cannot create session: {e}");
        std::process::exit(1);
    });
    let session = Arc::new(Mutex::new(session));

    // ── 3. Open the packet source ────────────────────────────────
    let source: Result<Box<dyn SegmentSource + Send>, latte::Error> = match &config.read {
        Some(path) => PcapSource::offline(path, config.ofport).map(|s| Box::new(s) as _),
        None => PcapSource::live(&config.device, config.ofport, config.snaplen).map(|s| Box::new(s) as _),
    };
    let mut source = source.unwrap_or_else(|e| {
        eprintln!("❌ Cannot open packet source: {e}");
        eprintln!("   Sniffing a device usually needs root or CAP_NET_RAW");
        std::process::exit(1);
    });

    // ── 4. Progress ticker (optional) ────────────────────────────
    if let Some(secs) = config.report_interval {
        tokio::spawn(progress::run(session.clone(), Duration::from_secs(secs)));
    }

    // ── 5. Capture until a signal or the end of the replay ───────
    let capture = {
        let session = session.clone();
        tokio::task::spawn_blocking(move || capture::run(source.as_mut(), &session))
    };

    println!("Capturing… press Ctrl-C to stop and print the report");
    println!();

    tokio::select! {
        sig = shutdown::terminated() => match sig {
            Ok(name) => println!("{name}"),
            Err(e) => {
                eprintln!("❌ Cannot listen for signals: {e}");
                std::process::exit(1);
            }
        },
        res = capture => match res.map_err(latte::Error::from).and_then(|r| r) {
            Ok(()) => info!("capture finished"),
            Err(e) => {
                eprintln!("❌ {e}");
                std::process::exit(2);
            }
        },
    }

    // ── 6. Final report ──────────────────────────────────────────
    let report = {
        let mut session = session.lock();
        session.finalize();
        session.report()
    };

    if config.json {
        println!("{}", report.to_json());
    } else {
        println!("{report}");
    }

    std::process::exit(0);
}
