use super::diagnose::unresolved_points;
use super::linker::link_local_frames;
use super::params::{ResolveMode, ResolverParams};
use super::step::resolve_point;
use crate::diagnostics::{FrameReport, PassSummary, ResolutionReport, ResolveTrace, TimingBreakdown};
use crate::error::NetworkError;
use crate::network::PointNetwork;
use log::{debug, info};
use std::time::Instant;

/// Fixed-point driver resolving a whole [`PointNetwork`] in place.
pub struct Resolver {
    params: ResolverParams,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverParams::default())
    }
}

impl Resolver {
    pub fn new(params: ResolverParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// Resolves `network` strictly and, if that leaves points unresolved,
    /// re-runs leniently from the input state.
    ///
    /// Findings of the strict pass are kept in the report even when the
    /// lenient result replaces the strict one. Errors are contract
    /// violations only; unresolvable points end up in
    /// [`ResolutionReport::unresolved`].
    pub fn run(&self, network: &mut PointNetwork) -> Result<ResolutionReport, NetworkError> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let mut trace = ResolveTrace::new();
        let mut passes = Vec::with_capacity(2);

        let input = self.params.lenient_fallback.then(|| network.clone());
        let strict = self.run_pass(network, ResolveMode::Strict, &mut trace)?;
        timings.push("strict", strict.elapsed_ms);
        let strict_converged = strict.converged;
        passes.push(strict);

        if let (false, Some(input)) = (strict_converged, input) {
            info!(
                "strict resolution left {} points unresolved, retrying leniently",
                network.len() - network.resolved_count()
            );
            *network = input;
            let lenient = self.run_pass(network, ResolveMode::Lenient, &mut trace)?;
            timings.push("lenient", lenient.elapsed_ms);
            passes.push(lenient);
        }

        let diagnose_start = Instant::now();
        let unresolved = unresolved_points(network);
        timings.push("diagnose", diagnose_start.elapsed().as_secs_f64() * 1000.0);
        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

        Ok(ResolutionReport {
            point_count: network.len(),
            resolved_count: network.resolved_count(),
            strict_converged,
            passes,
            timings,
            frames: network.frames().iter().map(FrameReport::from).collect(),
            inconsistencies: trace.inconsistencies().cloned().collect(),
            debug_points: trace.debug_points().cloned().collect(),
            unresolved,
        })
    }

    /// One fixed-point pass: sweep until every point is resolved or a sweep
    /// makes no progress.
    pub fn run_pass(
        &self,
        network: &mut PointNetwork,
        mode: ResolveMode,
        trace: &mut ResolveTrace,
    ) -> Result<PassSummary, NetworkError> {
        let start = Instant::now();
        let mut sweeps = 0usize;
        let mut resolved = 0usize;
        let mut frames_linked = 0usize;

        loop {
            sweeps += 1;
            let linked = link_local_frames(network)?;
            frames_linked += linked.len();
            let mut changed = !linked.is_empty();
            let mut needs_calculation = false;

            for id in network.unresolved_ids() {
                let Some(point) = network.get(&id) else {
                    continue;
                };
                match resolve_point(point, network, mode, &self.params, trace) {
                    Some(result) => {
                        network.settle(&id, result.position());
                        resolved += 1;
                        changed = true;
                    }
                    None => needs_calculation = true,
                }
            }

            debug!(
                "Resolver::run_pass {mode:?} sweep={sweeps} resolved={resolved} pending={}",
                network.len() - network.resolved_count()
            );
            if !(needs_calculation && changed) {
                break;
            }
        }

        Ok(PassSummary {
            mode,
            sweeps,
            resolved,
            frames_linked,
            converged: network.is_fully_resolved(),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::types::Coord;

    #[test]
    fn chain_resolves_regardless_of_insertion_order() {
        let mut net = PointNetwork::new();
        net.extend([
            Point::alias("d", "c"),
            Point::average("c", ["a", "b"]),
            Point::absolute("b", 2.0, 0.0),
            Point::absolute("a", 0.0, 0.0),
        ])
        .unwrap();

        let report = Resolver::default().run(&mut net).unwrap();
        assert!(report.strict_converged);
        assert_eq!(report.passes.len(), 1);
        assert_eq!(net.position("d"), Some(Coord::new(1.0, 0.0)));
    }

    #[test]
    fn self_reference_terminates_unresolved() {
        let mut net = PointNetwork::new();
        net.extend([Point::absolute("a", 0.0, 0.0), Point::alias("x", "x")])
            .unwrap();

        let report = Resolver::default().run(&mut net).unwrap();
        assert!(!report.strict_converged);
        assert_eq!(report.passes.len(), 2);
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].id, "x");
        assert!(report.passes.iter().all(|p| p.sweeps == 1));
    }

    #[test]
    fn fallback_can_be_disabled() {
        let mut net = PointNetwork::new();
        net.extend([Point::alias("x", "x")]).unwrap();
        let resolver = Resolver::new(ResolverParams {
            lenient_fallback: false,
            ..Default::default()
        });
        let report = resolver.run(&mut net).unwrap();
        assert_eq!(report.final_mode(), Some(ResolveMode::Strict));
    }
}
