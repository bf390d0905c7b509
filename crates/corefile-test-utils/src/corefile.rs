//! Canonical Corefile fixtures.
//!
//! The marker constants mirror the default vocabulary of `corefile-blocks`.

pub const BEGIN: &str = "# BEGIN IngressReconciler managed rules";
pub const END: &str = "# END IngressReconciler managed rules";

/// Corefile shipped by a default cluster install, with a multi-line
/// `kubernetes` block.
pub const STOCK: &str = "\
.:53 {
    errors
    health
    kubernetes cluster.local in-addr.arpa ip6.arpa {
        pods insecure
        fallthrough in-addr.arpa ip6.arpa
    }
    forward . /etc/resolv.conf
    cache 30
    loop
    reload
    loadbalance
}
";

/// Corefile whose `kubernetes` directive has no block.
pub const SINGLE_LINE_KUBERNETES: &str = "\
.:53 {
    errors
    kubernetes cluster.local in-addr.arpa ip6.arpa
    forward . /etc/resolv.conf
}
";

/// Corefile without any `kubernetes` directive.
pub const NO_KUBERNETES: &str = "\
.:53 {
    forward . /etc/resolv.conf
}
";

/// Corefile whose `kubernetes` block is never closed.
pub const UNCLOSED_KUBERNETES: &str = "\
.:53 {
    errors
    kubernetes cluster.local {
        pods insecure
";

/// Wrap `body` lines in the default markers.
pub fn region(body: &[&str]) -> String {
    let mut text = format!("{BEGIN}\n");
    for line in body {
        text.push_str(line);
        text.push('\n');
    }
    text.push_str(END);
    text.push('\n');
    text
}

/// [`STOCK`] with a managed region already placed after the `kubernetes`
/// block.
pub fn stock_with_region(body: &[&str]) -> String {
    let split = "    forward . /etc/resolv.conf\n";
    STOCK.replacen(split, &format!("{}{split}", region(body)), 1)
}
