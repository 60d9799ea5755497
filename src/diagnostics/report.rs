use super::consistency::{DebugPoint, Inconsistency};
use super::timing::TimingBreakdown;
use super::unresolved::UnresolvedPoint;
use crate::point::LocalFrame;
use crate::resolver::ResolveMode;
use crate::types::PointId;
use serde::Serialize;

/// Result returned by [`Resolver::run`](crate::Resolver::run).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionReport {
    pub point_count: usize,
    pub resolved_count: usize,
    /// Whether the strict pass alone resolved every point.
    pub strict_converged: bool,
    pub passes: Vec<PassSummary>,
    pub timings: TimingBreakdown,
    pub frames: Vec<FrameReport>,
    pub inconsistencies: Vec<Inconsistency>,
    pub debug_points: Vec<DebugPoint>,
    pub unresolved: Vec<UnresolvedPoint>,
}

impl ResolutionReport {
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Mode of the pass whose result is left in the network.
    pub fn final_mode(&self) -> Option<ResolveMode> {
        self.passes.last().map(|p| p.mode)
    }

    pub fn print_text_summary(&self) {
        println!("Resolution summary");
        println!(
            "  points: {} resolved / {} total",
            self.resolved_count, self.point_count
        );
        println!("  strict converged: {}", self.strict_converged);
        for pass in &self.passes {
            println!(
                "  {:?} pass: sweeps={} resolved={} frames_linked={} converged={} ({:.3} ms)",
                pass.mode,
                pass.sweeps,
                pass.resolved,
                pass.frames_linked,
                pass.converged,
                pass.elapsed_ms
            );
        }

        if !self.frames.is_empty() {
            println!("\nLocal frames");
            for frame in &self.frames {
                match (&frame.offset, &frame.anchor) {
                    (Some([dx, dy]), Some(anchor)) => println!(
                        "  {}: offset=({:.3}, {:.3}) via {}",
                        frame.frame, dx, dy, anchor
                    ),
                    _ => println!("  {}: not anchored", frame.frame),
                }
            }
        }

        if !self.inconsistencies.is_empty() {
            println!("\nInconsistencies ({})", self.inconsistencies.len());
            for finding in &self.inconsistencies {
                println!("  {finding}");
            }
        }

        if !self.unresolved.is_empty() {
            println!("\nUnresolved points ({})", self.unresolved.len());
            for point in &self.unresolved {
                println!("  {} [{}]: {}", point.id, point.variant, point.reason);
            }
        }

        println!("\nTotal: {:.3} ms", self.timings.total_ms);
    }
}

/// One strict or lenient fixed-point pass.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassSummary {
    pub mode: ResolveMode,
    pub sweeps: usize,
    /// Points resolved during this pass.
    pub resolved: usize,
    pub frames_linked: usize,
    /// No point was left unresolved when the pass stopped.
    pub converged: bool,
    pub elapsed_ms: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub frame: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<PointId>,
}

impl From<&LocalFrame> for FrameReport {
    fn from(frame: &LocalFrame) -> Self {
        Self {
            frame: frame.key().to_string(),
            offset: frame.offset().map(|o| [o.x, o.y]),
            anchor: frame.anchor().map(str::to_string),
        }
    }
}
