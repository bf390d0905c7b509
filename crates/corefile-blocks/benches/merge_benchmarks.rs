use corefile_blocks::{Rule, Vocabulary, merge};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn large_corefile(server_blocks: usize) -> String {
    let mut text = String::new();
    for i in 0..server_blocks {
        text.push_str(&format!(
            "zone{i}.example.org:53 {{\n    errors\n    log\n    file /etc/zones/zone{i}\n}}\n"
        ));
    }
    text.push_str(
        ".:53 {\n    kubernetes cluster.local {\n        pods insecure\n    }\n    forward . /etc/resolv.conf\n}\n",
    );
    text
}

fn rules(count: usize) -> Vec<Rule> {
    (0..count)
        .map(|i| Rule::new(format!("app{i}.example.com"), "ingress.svc.cluster.local"))
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let vocabulary = Vocabulary::default();
    let mut group = c.benchmark_group("merge");

    for size in [10, 100, 1000] {
        let corefile = large_corefile(size);
        let rules = rules(size);
        let merged = merge(&corefile, &rules, &[], &vocabulary);

        group.bench_with_input(BenchmarkId::new("insert", size), &corefile, |b, doc| {
            b.iter(|| merge(black_box(doc), black_box(&rules), &[], &vocabulary))
        });
        group.bench_with_input(BenchmarkId::new("replace", size), &merged, |b, doc| {
            b.iter(|| merge(black_box(doc), black_box(&rules), &[], &vocabulary))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
