//! Quick amount presets for the add form. A preset only fills in the amount
//! when the user has not typed one.

use rust_decimal::Decimal;

pub(crate) const QUICK_AMOUNTS: [u32; 5] = [5, 10, 20, 50, 100];

pub(crate) fn preset_amount(index: usize) -> Option<Decimal> {
    QUICK_AMOUNTS.get(index).map(|&a| Decimal::from(a))
}

/// The amount to submit: `typed` unless it is zero and a preset is active.
pub(crate) fn prefill_amount(typed: Decimal, preset: Option<usize>) -> Decimal {
    if !typed.is_zero() {
        return typed;
    }
    preset.and_then(preset_amount).unwrap_or(typed)
}

/// Off, then each preset in turn, then off again.
pub(crate) fn next_preset(current: Option<usize>) -> Option<usize> {
    match current {
        None => Some(0),
        Some(i) if i + 1 < QUICK_AMOUNTS.len() => Some(i + 1),
        Some(_) => None,
    }
}

pub(crate) fn find_preset(amount: Decimal) -> Option<usize> {
    QUICK_AMOUNTS.iter().position(|&a| Decimal::from(a) == amount)
}

pub(crate) fn label(preset: Option<usize>) -> String {
    match preset.and_then(preset_amount) {
        Some(amount) => format!("${amount}"),
        None => "off".to_string(),
    }
}
