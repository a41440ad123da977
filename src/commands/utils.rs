use crate::parser::GcType;
use crate::utils::config::SCHEMA_VERSION;

/// Display the collector phases the reader recognizes
pub fn display_types(show_details: bool) {
    println!("G1 (-XX:+PrintGCDetails) phase catalog");
    println!("JSON Schema Version: {}", SCHEMA_VERSION);
    println!();

    for gc_type in GcType::ALL {
        if show_details {
            println!(
                "  {:<42} {:<16} {:?}",
                gc_type.label(),
                format!("{:?}", gc_type.concurrency()),
                gc_type.shape()
            );
        } else {
            println!("  {}", gc_type.label());
        }
    }

    if !show_details {
        println!();
        println!("Use --show for concurrency and shape of each phase");
    }
}

/// Display version information
pub fn display_version() {
    println!("GC Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("JSON Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Reader for HotSpot G1 -XX:+PrintGCDetails logs.");
}
