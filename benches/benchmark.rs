use cladesort::classify::Classifier;
use cladesort::newick::parse_str;
use cladesort::taxonomy::Taxonomy;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// (num_groups, taxa_per_group)
const SYNTHETIC_SIZES: &[(usize, usize)] = &[(3, 8), (3, 500), (8, 200)];

/// Balanced Newick subtree over `taxa`.
fn balanced(taxa: &[String]) -> String {
    match taxa {
        [single] => single.clone(),
        _ => {
            let (left, right) = taxa.split_at(taxa.len() / 2);
            format!("({},{})", balanced(left), balanced(right))
        }
    }
}

/// Tree in which the first two groups are sisters and all others are
/// attached as a caterpillar, plus the matching taxonomy.
fn synthetic(num_groups: usize, taxa_per_group: usize) -> (String, Taxonomy) {
    let groups: Vec<Vec<String>> = (0..num_groups)
        .map(|g| (0..taxa_per_group).map(|t| format!("g{}_t{}", g, t)).collect())
        .collect();

    let mut newick = format!("({},{})", balanced(&groups[0]), balanced(&groups[1]));
    for group in &groups[2..] {
        newick = format!("({},{})", newick, balanced(group));
    }
    newick.push(';');

    let taxonomy = Taxonomy::from_pairs(groups.iter().enumerate().flat_map(|(g, taxa)| {
        taxa.iter()
            .map(move |t| (t.clone(), format!("Genus{:02}", g)))
    }))
    .unwrap();

    (newick, taxonomy)
}

fn parsing(c: &mut Criterion) {
    for &(num_groups, taxa_per_group) in SYNTHETIC_SIZES {
        let (newick, _) = synthetic(num_groups, taxa_per_group);
        let name = format!("parse/{}x{}", num_groups, taxa_per_group);
        c.bench_function(&name, |b| {
            b.iter(|| parse_str(black_box(&newick)).unwrap());
        });
    }
}

fn classification(c: &mut Criterion) {
    for &(num_groups, taxa_per_group) in SYNTHETIC_SIZES {
        let (newick, taxonomy) = synthetic(num_groups, taxa_per_group);
        let tree = parse_str(&newick).unwrap();
        let classifier = Classifier::new(&taxonomy);
        let name = format!("classify/{}x{}", num_groups, taxa_per_group);
        c.bench_function(&name, |b| {
            b.iter(|| classifier.classify(black_box(&tree)).unwrap());
        });
    }
}

criterion_group!(benches, parsing, classification);
criterion_main!(benches);
