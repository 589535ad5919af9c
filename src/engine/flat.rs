use log::{debug, info};

use super::clip_part;
use crate::{
    error::{check_tolerance, Result},
    flatten_geometries, ops, AtomicGeometry, GeomInput, Mask, Progress,
};

/// Output of the flat engine.
#[derive(Debug, Clone, Default)]
pub struct FlatOutput {
    /// Surviving pieces, in input order.
    pub kept: Vec<AtomicGeometry>,
    /// Clipped-away pieces, in input order.
    pub removed: Vec<AtomicGeometry>,
    pub mask: Mask,
}

/// De-overlap the flattened `input`.
///
/// Every atomic part is processed independently: its surviving pieces
/// are kept and together claim one mask entry. Earlier parts have
/// priority over later ones, including parts of the same geometry.
pub fn run<P: Progress + ?Sized>(
    input: &GeomInput,
    tolerance: f64,
    progress: &mut P,
) -> Result<FlatOutput> {
    check_tolerance(tolerance)?;
    let atoms = flatten_geometries(input)?;

    let mut out = FlatOutput::default();
    progress.begin("De-overlapping (flat)", atoms.len());
    for (idx, atom) in atoms.into_iter().enumerate() {
        let split = clip_part(atom, &out.mask)?;
        debug!(
            "atom {idx}: {k} kept, {r} removed pieces",
            k = split.kept.len(),
            r = split.removed.len(),
        );

        if !split.kept.is_empty() {
            let kept = ops::assemble(split.kept.clone());
            out.mask.claim(&kept, tolerance);
            out.kept.extend(split.kept);
        }
        out.removed.extend(split.removed);
        progress.advance();
    }
    progress.finish();

    info!(
        "flat: {k} kept, {r} removed, {m} mask entries",
        k = out.kept.len(),
        r = out.removed.len(),
        m = out.mask.len(),
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use approx::assert_relative_eq;
    use geo::{point, Buffer, Geometry, LineString};
    use wkt::TryFromWkt;

    use super::*;
    use crate::{
        progress::{LogProgress, Silent},
        random::*,
        tests::{curve_length, init_log, input_wkt},
        DeoverlapError,
    };

    #[test]
    fn test_simple_overlap() -> std::result::Result<(), Box<dyn Error>> {
        init_log();
        let input = input_wkt(&["LINESTRING(0 0,2 0)", "LINESTRING(1 0.05,3 0.05)"]);
        let out = run(&input, 0.1, &mut Silent)?;
        assert_eq!(out.kept.len(), 2);
        assert_eq!(out.removed.len(), 1);
        assert_eq!(out.mask.len(), 2);

        // The second line loses the stretch within the first's buffer.
        let second = curve_length(&out.kept[1]);
        assert!(second < 1. && second > 0.85, "kept {}", second);
        Ok(())
    }

    #[test]
    fn test_fully_engulfed() -> std::result::Result<(), Box<dyn Error>> {
        init_log();
        let input = input_wkt(&["LINESTRING(0 0,3 0)", "LINESTRING(1 0,2 0)"]);
        let out = run(&input, 0.2, &mut Silent)?;
        assert_eq!(out.kept.len(), 1);
        assert_eq!(out.removed.len(), 1);
        assert_relative_eq!(curve_length(&out.removed[0]), 1., epsilon = 1e-6);
        // Wholly removed atoms never claim mask area.
        assert_eq!(out.mask.len(), 1);
        Ok(())
    }

    #[test]
    fn test_crossing_splits_second() -> std::result::Result<(), Box<dyn Error>> {
        let input = input_wkt(&["LINESTRING(0 1,3 1)", "LINESTRING(1.5 0,1.5 2)"]);
        let out = run(&input, 0.2, &mut Silent)?;
        assert_eq!(out.kept.len(), 3);
        assert_eq!(out.removed.len(), 1);
        Ok(())
    }

    #[test]
    fn test_zero_length_curves() -> std::result::Result<(), Box<dyn Error>> {
        let input = input_wkt(&[
            "LINESTRING(0 0,2 0)",
            "LINESTRING(1 0,1 0)",
            "LINESTRING(5 5,5 5)",
        ]);
        let out = run(&input, 0.1, &mut Silent)?;
        // Inside the mask it is removed whole; elsewhere it is kept.
        let dot = |x: f64, y: f64| AtomicGeometry::from(LineString::from(vec![(x, y), (x, y)]));
        assert_eq!(out.removed, vec![dot(1., 0.)]);
        assert_eq!(out.kept.len(), 2);
        assert_eq!(out.kept[1], dot(5., 5.));
        Ok(())
    }

    #[test]
    fn test_tangent_circles_and_line() -> std::result::Result<(), Box<dyn Error>> {
        let circle = |x: f64, y: f64, r: f64| -> Geometry<f64> {
            point!(x: x, y: y).buffer(r).0.remove(0).into()
        };
        let input: GeomInput = vec![
            circle(0., 0., 1.5),
            circle(2., 0., 0.5),
            circle(0., 2.5, 1.),
            Geometry::<f64>::try_from_wkt_str("LINESTRING(-2 1,3 1)")?,
        ]
        .into();

        let out = run(&input, 0.1, &mut Silent)?;
        assert!(out.kept.len() > 4, "{} kept", out.kept.len());
        assert!(!out.removed.is_empty());
        Ok(())
    }

    #[test]
    fn test_priority_is_input_order() -> std::result::Result<(), Box<dyn Error>> {
        let long = "LINESTRING(0 0,4 0)";
        let short = "LINESTRING(1 0.05,2 0.05)";

        let out = run(&input_wkt(&[long, short]), 0.1, &mut Silent)?;
        assert_eq!(out.kept.len(), 1);
        assert_relative_eq!(curve_length(&out.kept[0]), 4., epsilon = 1e-6);

        let out = run(&input_wkt(&[short, long]), 0.1, &mut Silent)?;
        assert_relative_eq!(curve_length(&out.kept[0]), 1., epsilon = 1e-6);
        let rest: f64 = out.kept[1..].iter().map(curve_length).sum();
        assert!(rest < 3.1 && rest > 2.5, "kept {} of the long line", rest);
        Ok(())
    }

    #[test]
    fn test_polygon_rings_are_independent() -> std::result::Result<(), Box<dyn Error>> {
        // The hole lies within tolerance of the exterior and so loses
        // the stretch that runs alongside it.
        let input = input_wkt(&["POLYGON((0 0,4 0,4 4,0 4,0 0),(1 1,1 2,0.05 2,0.05 1,1 1))"]);
        let out = run(&input, 0.1, &mut Silent)?;
        assert_relative_eq!(curve_length(&out.kept[0]), 16., epsilon = 1e-9);
        assert!(out.kept.len() >= 3);

        let removed: f64 = out.removed.iter().map(curve_length).sum();
        assert_relative_eq!(removed, 1.1, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_points_grid() -> std::result::Result<(), Box<dyn Error>> {
        let mut geoms = vec![Geometry::<f64>::try_from_wkt_str(
            "POLYGON((0.5 0.5,0.5 1.5,1.5 1.5,1.5 0.5,0.5 0.5))",
        )?];
        geoms.extend(point_grid(10, 0.25).into_iter().map(Geometry::from));
        let input: GeomInput = geoms.into();

        let out = run(&input, 0.1, &mut Silent)?;
        let count = |atoms: &Vec<AtomicGeometry>| atoms.iter().filter(|a| !a.is_line_string()).count();
        assert_eq!(count(&out.kept) + count(&out.removed), 100);
        assert!(count(&out.removed) > 0);
        Ok(())
    }

    #[test]
    fn test_partition_random_lines() -> std::result::Result<(), Box<dyn Error>> {
        init_log();
        let lines = random_lines(0xdead_beef, 40, 10., 3.);
        let input: GeomInput = lines.iter().cloned().collect();
        let out = run(&input, 0.25, &mut Silent)?;

        let total: f64 = lines.iter().map(line_string_length).sum();
        let kept: f64 = out.kept.iter().map(curve_length).sum();
        let removed: f64 = out.removed.iter().map(curve_length).sum();
        assert_relative_eq!(kept + removed, total, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_empty_and_invalid() {
        let out = run(&GeomInput::empty(), 0.1, &mut Silent).unwrap();
        assert!(out.kept.is_empty() && out.removed.is_empty() && out.mask.is_empty());

        let input = input_wkt(&["LINESTRING(0 0,1 0)"]);
        assert_eq!(
            run(&input, 0., &mut Silent).unwrap_err(),
            DeoverlapError::InvalidTolerance(0.)
        );

        let bad: GeomInput = LineString::from(vec![(0., 0.), (f64::INFINITY, 1.)]).into();
        assert_eq!(
            run(&bad, 0.1, &mut Silent).unwrap_err(),
            DeoverlapError::NonFiniteCoordinate { kind: "LineString" }
        );
    }

    #[test]
    fn test_progress_ticks_per_atom() -> std::result::Result<(), Box<dyn Error>> {
        let input = input_wkt(&["MULTIPOINT((0 0),(0 0.01),(5 5))", "LINESTRING(0 0,1 0)"]);
        let mut progress = LogProgress::new();
        run(&input, 0.1, &mut progress)?;
        assert_eq!(progress.done(), 4);
        Ok(())
    }
}
