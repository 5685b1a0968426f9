//! 68-point facial landmarks in the iBUG-300W ordering.
//!
//! Left/right are as seen in the image, not from the subject's point of view.

use std::ops::Range;

use thiserror::Error;

use crate::shared::geometry::Point;

pub const LANDMARK_COUNT: usize = 68;

pub const JAW: Range<usize> = 0..17;
pub const RIGHT_EYEBROW: Range<usize> = 17..22;
pub const LEFT_EYEBROW: Range<usize> = 22..27;
pub const NOSE_BRIDGE: Range<usize> = 27..31;
pub const LOWER_NOSE: Range<usize> = 31..36;
pub const LEFT_EYE: Range<usize> = 36..42;
pub const RIGHT_EYE: Range<usize> = 42..48;
pub const OUTER_LIP: Range<usize> = 48..60;
pub const INNER_LIP: Range<usize> = 60..68;

/// Inner brow span used as the top reference for face height.
pub const BROW_SPAN: Range<usize> = 19..25;

pub const NOSE_TIP: usize = 30;
pub const CHIN: usize = 8;
pub const JAW_LEFT_CORNER: usize = 0;
pub const JAW_RIGHT_CORNER: usize = 16;

#[derive(Error, Debug, PartialEq)]
pub enum LandmarkError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongPointCount(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceRegion {
    Jaw,
    RightEyebrow,
    LeftEyebrow,
    NoseBridge,
    LowerNose,
    LeftEye,
    RightEye,
    OuterLip,
    InnerLip,
    BrowSpan,
}

impl FaceRegion {
    pub fn range(self) -> Range<usize> {
        match self {
            FaceRegion::Jaw => JAW,
            FaceRegion::RightEyebrow => RIGHT_EYEBROW,
            FaceRegion::LeftEyebrow => LEFT_EYEBROW,
            FaceRegion::NoseBridge => NOSE_BRIDGE,
            FaceRegion::LowerNose => LOWER_NOSE,
            FaceRegion::LeftEye => LEFT_EYE,
            FaceRegion::RightEye => RIGHT_EYE,
            FaceRegion::OuterLip => OUTER_LIP,
            FaceRegion::InnerLip => INNER_LIP,
            FaceRegion::BrowSpan => BROW_SPAN,
        }
    }
}

/// One detected face. The point count is checked once here so region
/// slicing elsewhere never goes out of bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: Box<[Point; LANDMARK_COUNT]>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Result<Self, LandmarkError> {
        let len = points.len();
        let points: Box<[Point; LANDMARK_COUNT]> = points
            .into_boxed_slice()
            .try_into()
            .map_err(|_| LandmarkError::WrongPointCount(len))?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points[..]
    }

    /// Point at one of the named index constants (`NOSE_TIP`, `CHIN`, ...).
    ///
    /// # Panics
    ///
    /// If `index >= LANDMARK_COUNT`.
    pub(crate) fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn region(&self, region: FaceRegion) -> &[Point] {
        &self.points[region.range()]
    }
}

impl TryFrom<Vec<(f64, f64)>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(points: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        LandmarkSet::new(points.into_iter().map(Point::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn indexed_points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_accepts_exactly_68_points() {
        let set = LandmarkSet::new(indexed_points(68)).unwrap();
        assert_eq!(set.points().len(), LANDMARK_COUNT);
        assert_eq!(set.point(NOSE_TIP), Point::new(30.0, 0.0));
    }

    #[rstest]
    #[case::empty(0)]
    #[case::five_point(5)]
    #[case::one_short(67)]
    #[case::one_over(69)]
    fn test_rejects_wrong_count(#[case] n: usize) {
        assert_eq!(
            LandmarkSet::new(indexed_points(n)),
            Err(LandmarkError::WrongPointCount(n))
        );
    }

    #[rstest]
    #[case::jaw(FaceRegion::Jaw, 0, 17)]
    #[case::right_eyebrow(FaceRegion::RightEyebrow, 17, 5)]
    #[case::left_eyebrow(FaceRegion::LeftEyebrow, 22, 5)]
    #[case::nose_bridge(FaceRegion::NoseBridge, 27, 4)]
    #[case::lower_nose(FaceRegion::LowerNose, 31, 5)]
    #[case::left_eye(FaceRegion::LeftEye, 36, 6)]
    #[case::right_eye(FaceRegion::RightEye, 42, 6)]
    #[case::outer_lip(FaceRegion::OuterLip, 48, 12)]
    #[case::inner_lip(FaceRegion::InnerLip, 60, 8)]
    #[case::brow_span(FaceRegion::BrowSpan, 19, 6)]
    fn test_region_slices(#[case] region: FaceRegion, #[case] start: usize, #[case] len: usize) {
        let set = LandmarkSet::new(indexed_points(68)).unwrap();
        let slice = set.region(region);
        assert_eq!(slice.len(), len);
        assert_eq!(slice[0].x, start as f64);
    }

    #[test]
    fn test_anatomical_regions_tile_all_points() {
        let regions = [
            JAW,
            RIGHT_EYEBROW,
            LEFT_EYEBROW,
            NOSE_BRIDGE,
            LOWER_NOSE,
            LEFT_EYE,
            RIGHT_EYE,
            OUTER_LIP,
            INNER_LIP,
        ];
        let mut next = 0;
        for r in regions {
            assert_eq!(r.start, next);
            next = r.end;
        }
        assert_eq!(next, LANDMARK_COUNT);
    }

    #[test]
    fn test_named_indices_are_in_range() {
        let set = LandmarkSet::new(indexed_points(68)).unwrap();
        for index in [NOSE_TIP, CHIN, JAW_LEFT_CORNER, JAW_RIGHT_CORNER] {
            assert_eq!(set.point(index), set.points()[index]);
        }
    }

    #[test]
    #[should_panic]
    fn test_point_out_of_range_panics() {
        LandmarkSet::new(indexed_points(68)).unwrap().point(LANDMARK_COUNT);
    }

    #[test]
    fn test_try_from_tuples() {
        let tuples: Vec<(f64, f64)> = (0..68).map(|i| (i as f64, 1.0)).collect();
        let set = LandmarkSet::try_from(tuples).unwrap();
        assert_eq!(set.point(CHIN), Point::new(8.0, 1.0));
    }
}
