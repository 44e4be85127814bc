//! Efficiency metrics of loss systems (`M/M/n/0` queues): `n` identical
//! service channels and no waiting room, so a request that finds every
//! channel busy is rejected outright.
//!
//! Like the rest of the engine this is plain values in, plain data out: the
//! caller formats the table.
//!

use std::num::FpCategory;

use crate::errors::SpecError;

/// The steady-state efficiency metrics of a loss system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossSystemMetrics {
    /// The number of service channels `n`.
    pub channels: usize,
    /// `p0`: the probability that every channel is idle.
    pub idle_probability: f64,
    /// The probability that an arriving request finds every channel busy and
    /// is rejected.
    pub rejection_probability: f64,
    /// `Q = 1 - rejection_probability`: the fraction of requests that get
    /// served.
    pub relative_throughput: f64,
    /// `A = arrival_rate * Q`: served requests per unit of time.
    pub absolute_throughput: f64,
}

/// Computes the steady-state metrics of a loss system with `channels`
/// identical channels, arrival intensity `arrival_rate` and per-channel
/// service intensity `service_rate` (both in requests per unit of time).
///
/// The rejection probability is the
/// [Erlang B formula](https://en.wikipedia.org/wiki/Erlang_(unit)#Erlang_B_formula)
/// evaluated at the offered load `rho = arrival_rate / service_rate`:
///
/// `P_reject = (rho^n / n!) / sum_{k=0..n} (rho^k / k!)`
///
/// The terms `rho^k / k!` are accumulated incrementally
/// (`term_k = term_{k-1} * rho / k`), so no factorial is ever materialized
/// and the sum stays well conditioned for any realistic channel count.
///
/// With a single channel this reduces to the familiar
/// `Q = service_rate / (arrival_rate + service_rate)`.
///
/// # Errors
///
/// Will return an error if:
///  - `arrival_rate` or `service_rate` is a NaN ([SpecError::NanErr]).
///  - `arrival_rate` or `service_rate` is not finite and positive, or
///    `channels == 0` ([SpecError::InvalidParameter]).
pub fn loss_system_metrics(
    arrival_rate: f64,
    service_rate: f64,
    channels: usize,
) -> Result<LossSystemMetrics, SpecError> {
    match arrival_rate.classify() {
        FpCategory::Nan => return Err(SpecError::NanErr),
        FpCategory::Infinite => return Err(SpecError::InvalidParameter),
        FpCategory::Zero => return Err(SpecError::InvalidParameter),
        _ => {}
    }
    match service_rate.classify() {
        FpCategory::Nan => return Err(SpecError::NanErr),
        FpCategory::Infinite => return Err(SpecError::InvalidParameter),
        FpCategory::Zero => return Err(SpecError::InvalidParameter),
        _ => {}
    }
    if arrival_rate < 0.0 || service_rate < 0.0 || channels == 0 {
        return Err(SpecError::InvalidParameter);
    }

    let load: f64 = arrival_rate / service_rate;

    // term holds rho^k / k!; after the loop it is the top term rho^n / n!
    let mut term: f64 = 1.0;
    let mut normalization: f64 = 1.0;
    for k in 1..=channels {
        term = term * (load / k as f64);
        normalization += term;
    }

    let idle_probability: f64 = 1.0 / normalization;
    let rejection_probability: f64 = term / normalization;
    let relative_throughput: f64 = 1.0 - rejection_probability;
    let absolute_throughput: f64 = arrival_rate * relative_throughput;

    return Ok(LossSystemMetrics {
        channels: channels,
        idle_probability: idle_probability,
        rejection_probability: rejection_probability,
        relative_throughput: relative_throughput,
        absolute_throughput: absolute_throughput,
    });
}

/// Computes [loss_system_metrics] for every channel count from 1 to
/// `max_channels`, in order: the raw data of the usual "how many channels do
/// we actually need" table.
///
/// # Errors
///
/// Same conditions as [loss_system_metrics] (with `max_channels` in the role
/// of `channels`).
pub fn loss_system_sweep(
    arrival_rate: f64,
    service_rate: f64,
    max_channels: usize,
) -> Result<Vec<LossSystemMetrics>, SpecError> {
    if max_channels == 0 {
        return Err(SpecError::InvalidParameter);
    }

    let mut results: Vec<LossSystemMetrics> = Vec::with_capacity(max_channels);
    for channels in 1..=max_channels {
        results.push(loss_system_metrics(arrival_rate, service_rate, channels)?);
    }

    return Ok(results);
}
