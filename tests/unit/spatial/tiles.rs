//! Tests for tile extraction, adjacency derivation and catalog validation

#[cfg(test)]
mod tests {
    use collapsegrid::AlgorithmError;
    use collapsegrid::spatial::grid::Direction;
    use collapsegrid::spatial::tiles::{Neighbors, TileCatalog, TileExtractor};
    use ndarray::{Array2, array};

    // Horizontal stripes: rows alternate between 1 and 2
    const STRIPES: [u8; 12] = [
        1, 1, 1, //
        2, 2, 2, //
        1, 1, 1, //
        2, 2, 2, //
    ];

    // Tests every window position is counted in the weights
    // Verified by counting only distinct windows
    #[test]
    fn test_extract_counts_every_window() {
        let catalog = TileExtractor::extract(&STRIPES, 3, 4, 2, 2).expect("Failed to extract");
        let windows = (3 - 2 + 1) * (4 - 2 + 1);
        assert_eq!(catalog.weights.iter().sum::<u32>(), windows);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.tiles, vec![1, 2]);
        assert_eq!(catalog.weights, vec![4, 2]);
    }

    // Tests tile ids follow raster order of first occurrence
    // Verified by scanning columns before rows
    #[test]
    fn test_extract_raster_order() {
        let pattern = [
            5, 6, //
            7, 8, //
        ];
        let catalog = TileExtractor::extract(&pattern, 2, 2, 1, 1).expect("Failed to extract");
        assert_eq!(catalog.tiles, vec![5, 6, 7, 8]);
        assert_eq!(catalog.weights, vec![1, 1, 1, 1]);
    }

    // Tests a 1x1 window lets every tile neighbor every tile
    // Verified by requiring equal payloads for 1x1 windows
    #[test]
    fn test_unit_window_is_fully_connected() {
        let catalog =
            TileExtractor::extract(&[1_u8, 2, 3], 3, 1, 1, 1).expect("Failed to extract");
        for rules in &catalog.neighbors {
            for direction in Direction::ALL {
                assert_eq!(rules.get(direction).count(), 3);
            }
        }
    }

    // Tests stripe rules alternate vertically and repeat horizontally
    // Verified by swapping the Up and Down overlap checks
    #[test]
    fn test_extract_stripe_rules() {
        let catalog = TileExtractor::extract(&STRIPES, 3, 4, 2, 2).expect("Failed to extract");
        let rules = catalog.neighbors.first().expect("tile 0 rules");
        assert_eq!(rules.get(Direction::Down).to_vec(), vec![1]);
        assert_eq!(rules.get(Direction::Up).to_vec(), vec![1]);
        assert_eq!(rules.get(Direction::Left).to_vec(), vec![0]);
        assert_eq!(rules.get(Direction::Right).to_vec(), vec![0]);
        assert!(catalog.is_symmetric());
    }

    // Tests the overlap rule for each direction
    // Verified by comparing whole windows instead of the shifted overlap
    #[test]
    fn test_is_neighbor_directions() {
        let top: Array2<u8> = array![[1, 2], [3, 4]];
        let below: Array2<u8> = array![[3, 4], [5, 6]];
        let right: Array2<u8> = array![[2, 7], [4, 8]];

        assert!(TileExtractor::is_neighbor(top.view(), below.view(), Direction::Down));
        assert!(TileExtractor::is_neighbor(below.view(), top.view(), Direction::Up));
        assert!(!TileExtractor::is_neighbor(top.view(), below.view(), Direction::Up));
        assert!(TileExtractor::is_neighbor(top.view(), right.view(), Direction::Right));
        assert!(TileExtractor::is_neighbor(right.view(), top.view(), Direction::Left));
        assert!(!TileExtractor::is_neighbor(top.view(), right.view(), Direction::Left));
    }

    // Tests derived rules are symmetric
    // Verified by only recording the forward direction
    #[test]
    fn test_build_neighbors_symmetric() {
        let windows: Vec<Array2<u8>> = vec![
            array![[0, 1], [1, 0]],
            array![[1, 0], [0, 1]],
            array![[0, 0], [1, 1]],
            array![[1, 1], [0, 0]],
        ];
        let neighbors = TileExtractor::build_neighbors(&windows);
        for (a, rules) in neighbors.iter().enumerate() {
            for direction in Direction::ALL {
                for b in rules.get(direction).iter_ones() {
                    let other = neighbors.get(b).expect("rule for b");
                    assert!(other.allows(direction.reverse(), a), "{a} {direction:?} {b}");
                }
            }
        }
        let first = neighbors.first().expect("rules for tile 0");
        assert!(first.allows(Direction::Down, 1));
        assert!(first.allows(Direction::Right, 1));
    }

    // Tests a single-tile catalog borders itself everywhere
    // Verified by deriving the lone tile's rules from the overlap check
    #[test]
    fn test_single_tile_is_self_adjacent() {
        let catalog = TileExtractor::extract(&[4_u8; 6], 3, 2, 3, 2).expect("Failed to extract");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.weights, vec![1]);
        let rules = catalog.neighbors.first().expect("tile 0 rules");
        for direction in Direction::ALL {
            assert!(rules.allows(direction, 0));
        }
    }

    // Tests invalid windows and buffers are rejected
    // Verified by removing the window size checks
    #[test]
    fn test_extract_rejects_bad_input() {
        assert!(matches!(
            TileExtractor::extract(&STRIPES, 3, 4, 0, 2),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
        assert!(matches!(
            TileExtractor::extract(&STRIPES, 3, 4, 4, 2),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
        assert!(matches!(
            TileExtractor::extract(&STRIPES, 4, 4, 2, 2),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Tests validation catches structural catalog problems
    // Verified by only checking the tile count
    #[test]
    fn test_validate_rejects_malformed_catalogs() {
        let good = TileCatalog {
            tiles: vec!['a', 'b'],
            weights: vec![1, 2],
            neighbors: vec![Neighbors::full(2); 2],
        };
        assert!(good.validate().is_ok());

        let empty: TileCatalog<char> = TileCatalog {
            tiles: Vec::new(),
            weights: Vec::new(),
            neighbors: Vec::new(),
        };
        let mut short_weights = good.clone();
        short_weights.weights.pop();
        let mut short_rules = good.clone();
        short_rules.neighbors.pop();
        let mut wrong_capacity = good.clone();
        wrong_capacity.neighbors = vec![Neighbors::full(3); 2];
        let mut weightless = good.clone();
        weightless.weights = vec![0, 0];

        for catalog in [empty, short_weights, short_rules, wrong_capacity, weightless] {
            assert!(matches!(
                catalog.validate(),
                Err(AlgorithmError::InvalidCatalog { .. })
            ));
        }
    }

    // Tests catalog size queries are callable from const functions
    // Verified by reporting the weight count as the length
    #[test]
    fn test_catalog_len_is_const() {
        const fn size(catalog: &TileCatalog<u8>) -> (usize, bool) {
            (catalog.len(), catalog.is_empty())
        }

        let empty = TileCatalog {
            tiles: Vec::new(),
            weights: Vec::new(),
            neighbors: Vec::new(),
        };
        assert_eq!(size(&empty), (0, true));

        let mut catalog =
            TileExtractor::extract(&STRIPES, 3, 4, 2, 2).expect("Failed to extract");
        catalog.weights.push(1);
        assert_eq!(size(&catalog), (2, false));
    }

    // Tests asymmetric rules are detected but still accepted
    // Verified by rejecting asymmetric catalogs
    #[test]
    fn test_asymmetric_rules_are_accepted() {
        let mut neighbors = vec![Neighbors::new(2), Neighbors::new(2)];
        if let Some(rules) = neighbors.first_mut() {
            rules.get_mut(Direction::Right).set(1, true);
        }
        let catalog = TileCatalog {
            tiles: vec![0_u8, 1],
            weights: vec![1, 1],
            neighbors,
        };
        assert!(!catalog.is_symmetric());
        assert!(catalog.validate().is_ok());
    }
}
