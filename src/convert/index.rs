//! Enumeratie van coördinaten over een N-dimensionale vorm.
//!
//! De volgorde is rij-majeur: de laatste coördinaat loopt het snelst. De
//! platmaker en de hervormer gebruiken exact dezelfde enumeratie, zodat
//! platmaken en hervormen elkaars inverse zijn.

/// Iterator over alle coördinaten van een rechthoekige vorm.
///
/// Werkt als een kilometerteller: de laatste coördinaat telt op; bij het
/// bereiken van de dimensiegrens valt hij terug naar 0 en schuift de
/// overdracht één coördinaat naar buiten. De enumeratie stopt zodra de
/// overdracht voorbij de eerste coördinaat schuift. Een nieuwe iterator
/// over dezelfde afmetingen levert altijd dezelfde volgorde.
#[derive(Debug, Clone)]
pub struct MultiIndex {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl MultiIndex {
    /// Maakt een iterator over de opgegeven afmetingen. Een dimensie met
    /// lengte 0 levert een lege enumeratie; rang 0 levert precies één
    /// leeg coördinaat.
    #[must_use]
    pub fn new(dims: &[usize]) -> Self {
        let next = if dims.contains(&0) {
            None
        } else {
            Some(vec![0; dims.len()])
        };
        Self {
            dims: dims.to_vec(),
            next,
        }
    }
}

impl Iterator for MultiIndex {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut candidate = current.clone();
        for axis in (0..self.dims.len()).rev() {
            candidate[axis] += 1;
            if candidate[axis] < self.dims[axis] {
                self.next = Some(candidate);
                return Some(current);
            }
            candidate[axis] = 0;
        }
        // De overdracht schoof voorbij de eerste coördinaat.
        Some(current)
    }
}

/// Rij-majeure platte index van een coördinaat binnen de afmetingen.
#[must_use]
pub fn linear_index(coords: &[usize], dims: &[usize]) -> usize {
    coords
        .iter()
        .zip(dims)
        .fold(0, |offset, (index, bound)| offset * bound + index)
}

#[cfg(test)]
mod tests {
    use super::{MultiIndex, linear_index};

    #[test]
    fn enumerates_row_major_order() {
        let coords: Vec<Vec<usize>> = MultiIndex::new(&[2, 3]).collect();
        assert_eq!(
            coords,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn rank_zero_yields_single_empty_tuple() {
        let coords: Vec<Vec<usize>> = MultiIndex::new(&[]).collect();
        assert_eq!(coords, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn zero_length_dimension_yields_nothing() {
        assert_eq!(MultiIndex::new(&[3, 0, 2]).count(), 0);
    }

    #[test]
    fn fresh_iterators_repeat_the_same_order() {
        let first: Vec<_> = MultiIndex::new(&[2, 2, 2]).collect();
        let second: Vec<_> = MultiIndex::new(&[2, 2, 2]).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn linear_index_matches_enumeration_position() {
        let dims = [3, 4, 2];
        for (position, coords) in MultiIndex::new(&dims).enumerate() {
            assert_eq!(linear_index(&coords, &dims), position);
        }
    }
}
