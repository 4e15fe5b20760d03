use crate::axis::DomainExtent;
use crate::error::{LbError, LbResult};

/// Integer material code per cell, as read from the geometry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryField {
    extent: DomainExtent,
    codes: Vec<i32>,
}

impl GeometryField {
    /// `codes` is ordered with z varying fastest, then y, then x.
    pub fn new(extent: DomainExtent, codes: Vec<i32>) -> LbResult<Self> {
        let expected = extent.get_number_of_cells();
        if codes.len() != expected {
            return Err(LbError::GeometryMismatch {
                nx: extent.nx,
                ny: extent.ny,
                nz: extent.nz,
                expected,
                found: codes.len(),
            });
        }
        Ok(GeometryField { extent, codes })
    }

    pub fn uniform(extent: DomainExtent, code: i32) -> Self {
        GeometryField {
            extent,
            codes: vec![code; extent.get_number_of_cells()],
        }
    }

    /// Parses whitespace-separated integer codes.
    ///
    /// # Examples
    /// ```
    /// # use lbperm::axis::DomainExtent;
    /// # use lbperm::geometry::GeometryField;
    /// let extent = DomainExtent::new(2, 2, 2).unwrap();
    /// let geometry = GeometryField::parse(extent, "0 1\n0 0\n\n2 0\n0 0\n").unwrap();
    ///
    /// assert_eq!(geometry.get([0, 0, 1]), 1);
    /// assert_eq!(geometry.get([1, 0, 0]), 2);
    /// ```
    pub fn parse(extent: DomainExtent, contents: &str) -> LbResult<Self> {
        let codes = contents
            .split_whitespace()
            .enumerate()
            .map(|(position, token)| {
                token.parse::<i32>().map_err(|_| LbError::GeometryParse {
                    token: token.to_string(),
                    position,
                })
            })
            .collect::<LbResult<Vec<i32>>>()?;
        GeometryField::new(extent, codes)
    }

    pub fn get_extent(&self) -> &DomainExtent {
        &self.extent
    }

    pub fn get(&self, index: [usize; 3]) -> i32 {
        let [x, y, z] = index;
        self.codes[(x * self.extent.ny + y) * self.extent.nz + z]
    }

    pub fn set(&mut self, index: [usize; 3], code: i32) {
        let [x, y, z] = index;
        self.codes[(x * self.extent.ny + y) * self.extent.nz + z] = code;
    }

    pub fn count(&self, code: i32) -> usize {
        self.codes.iter().filter(|&&c| c == code).count()
    }
}
