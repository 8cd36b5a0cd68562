//! Startup banner and URL display

use super::config::is_all_interfaces;
use super::constants::APP_NAME;

// Label width for alignment
const W: usize = 9;

/// Host to show in URLs; wildcard binds display as localhost
fn display_host(host: &str) -> &str {
    if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    }
}

/// Network URLs reachable from other machines, if any
fn network_urls(host: &str, port: u16) -> Vec<String> {
    if host == "127.0.0.1" || host == "localhost" {
        return Vec::new();
    }
    if !is_all_interfaces(host) {
        return vec![format!("http://{}:{}", host, port)];
    }
    local_ip_address::list_afinet_netifas()
        .map(|interfaces| {
            interfaces
                .iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
                .map(|(_, ip)| format!("http://{}:{}", ip, port))
                .collect()
        })
        .unwrap_or_default()
}

/// Print the startup banner with URLs
pub fn print_banner(host: &str, port: u16, data_dir: &str) {
    let base = format!("http://{}:{}", display_host(host), port);

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m \x1b[36m{}/api/v1\x1b[0m",
        "API:", base
    );
    println!(
        "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m \x1b[36m{}/api/docs\x1b[0m",
        "Docs:", base
    );

    let network = network_urls(host, port);
    if network.is_empty() {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }
    for url in network {
        println!(
            "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m \x1b[36m{}\x1b[0m",
            "Network:", url
        );
    }
    println!("  \x1b[90m➜  {:<W$} {}\x1b[0m", "Data:", data_dir);
    println!();
}
