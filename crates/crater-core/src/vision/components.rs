use ndarray::Array2;

/// Pixel adjacency used when grouping foreground pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    Four,
    Eight,
}

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Unique label for this component (matches the label map).
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
}

impl ComponentStats {
    fn include(&mut self, row: usize, col: usize) {
        self.area += 1;
        let (r0, r1, c0, c1) = self.bbox;
        self.bbox = (r0.min(row), r1.max(row), c0.min(col), c1.max(col));
    }
}

/// Label map plus per-component statistics.
#[derive(Clone, Debug)]
pub struct Labeling {
    /// 0 for background, otherwise the component's label.
    pub labels: Array2<u32>,
    /// Components in raster order of their first pixel.
    pub components: Vec<ComponentStats>,
}

/// Two-pass union-find labeling of the `true` pixels of `mask`.
pub fn label_components(mask: &Array2<bool>, connectivity: Connectivity) -> Labeling {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return Labeling {
            labels,
            components: Vec::new(),
        };
    }

    // parent[0] is unused; labels start at 1.
    let mut next_label: u32 = 1;
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels from already-visited neighbors.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut neighbors = [0u32; 4];
            neighbors[0] = if col > 0 { labels[[row, col - 1]] } else { 0 };
            neighbors[1] = if row > 0 { labels[[row - 1, col]] } else { 0 };
            if connectivity == Connectivity::Eight && row > 0 {
                neighbors[2] = if col > 0 { labels[[row - 1, col - 1]] } else { 0 };
                neighbors[3] = if col + 1 < w { labels[[row - 1, col + 1]] } else { 0 };
            }

            let smallest = neighbors.iter().copied().filter(|&l| l > 0).min();
            match smallest {
                None => {
                    if next_label as usize == parent.len() {
                        parent.push(0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                Some(smallest) => {
                    labels[[row, col]] = smallest;
                    for &other in neighbors.iter().filter(|&&l| l > 0 && l != smallest) {
                        union(&mut parent, smallest, other);
                    }
                }
            }
        }
    }

    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: relabel to roots. Roots are the smallest label of each set, so
    // iterating slots by label yields components in raster order.
    let mut slots: Vec<Option<ComponentStats>> = vec![None; next_label as usize];
    for ((row, col), label) in labels.indexed_iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = parent[*label as usize];
        *label = root;
        let slot = &mut slots[root as usize];
        if let Some(stats) = slot.as_mut() {
            stats.include(row, col);
        } else {
            *slot = Some(ComponentStats {
                label: root,
                area: 1,
                bbox: (row, row, col, col),
            });
        }
    }

    let components = slots.into_iter().flatten().collect();
    Labeling { labels, components }
}

/// Returns true if the component's bounding box touches any edge of the image.
pub fn touches_border(bbox: (usize, usize, usize, usize), height: usize, width: usize) -> bool {
    let (min_row, max_row, min_col, max_col) = bbox;
    min_row == 0 || max_row >= height - 1 || min_col == 0 || max_col >= width - 1
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        parent[ra.max(rb) as usize] = ra.min(rb);
    }
}
