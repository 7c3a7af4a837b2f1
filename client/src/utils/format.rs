//! Display formatting for addresses, balances and cooldowns.

use alloy_primitives::{Address, U256};

const WEI_DECIMALS: usize = 18;

/// Lowercase `0x`-prefixed hex, the form wallets hand out and the backend stores.
pub fn lower_hex(address: &Address) -> String {
    address.to_string().to_lowercase()
}

/// Wei as a decimal ether string with trailing zeros trimmed, keeping one
/// fractional digit: `1.5`, `2.0`, `0.000000000000000001`.
pub fn format_ether(wei: U256) -> String {
    let unit = U256::from(10u64).pow(U256::from(WEI_DECIMALS));
    let whole = wei / unit;
    let frac = wei % unit;

    let frac = format!("{:0>width$}", frac.to_string(), width = WEI_DECIMALS);
    let frac = frac.trim_end_matches('0');
    let frac = if frac.is_empty() { "0" } else { frac };

    format!("{}.{}", whole, frac)
}

/// Faucet cooldown as `"{h}h {m}m {s}s"`.
pub fn format_cooldown(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{}h {}m {}s", hrs, mins, secs)
}
