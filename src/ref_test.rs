// Reference model, a sorted vector of keys with duplicates.
struct RefKeys {
    keys: Vec<i64>,
}

impl RefKeys {
    fn new() -> RefKeys {
        RefKeys { keys: vec![] }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn insert(&mut self, key: i64) {
        // equal keys go right, insert after the last equal.
        let off = self.keys.iter().take_while(|k| **k <= key).count();
        self.keys.insert(off, key);
    }

    fn delete(&mut self, key: i64) -> Option<i64> {
        match self.keys.iter().position(|k| *k == key) {
            Some(off) => Some(self.keys.remove(off)),
            None => None,
        }
    }

    fn contains(&self, key: i64) -> bool {
        self.keys.contains(&key)
    }

    fn minimum(&self) -> Option<i64> {
        self.keys.first().cloned()
    }

    fn maximum(&self) -> Option<i64> {
        self.keys.last().cloned()
    }

    fn iter(&self) -> std::vec::IntoIter<i64> {
        self.keys.clone().into_iter()
    }
}

fn make_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64
}

fn init_logging() {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Debug, simplelog::Config::default());
}
