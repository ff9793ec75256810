use criterion::{criterion_group, criterion_main, Criterion};

use gmcli::config::StoreConfig;
use gmcli::model::EmailAccount;
use gmcli::store::AccountStore;

fn account(i: usize) -> EmailAccount {
    EmailAccount::new(format!("user{i}@example.com")).with_field(
        "oauth2",
        serde_json::json!({
            "clientId": "cid.apps.googleusercontent.com",
            "clientSecret": "secret",
            "refreshToken": format!("refresh-{i}"),
        }),
    )
}

fn bench_open(c: &mut Criterion) {
    let tmp = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(tmp.path().join(".gmcli"));
    {
        let mut store = AccountStore::open(config.clone()).unwrap();
        for i in 0..200 {
            store.add_account(account(i)).unwrap();
        }
    }

    c.bench_function("open_200_accounts", |b| {
        b.iter(|| AccountStore::open(config.clone()).unwrap().len())
    });
}

fn bench_upsert(c: &mut Criterion) {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = AccountStore::open(StoreConfig::new(tmp.path().join(".gmcli"))).unwrap();
    for i in 0..50 {
        store.add_account(account(i)).unwrap();
    }

    let mut n = 0usize;
    c.bench_function("upsert_existing_account", |b| {
        b.iter(|| {
            n = (n + 1) % 50;
            store.add_account(account(n)).unwrap();
        })
    });
}

criterion_group!(benches, bench_open, bench_upsert);
criterion_main!(benches);
