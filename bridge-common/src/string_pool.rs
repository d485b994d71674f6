use std::sync::Arc;

use bimap::BiHashMap;
use lazy_static::lazy_static;
use parking_lot::RwLock;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct StringId(pub u32);

impl StringId {
    pub const EMPTY: StringId = StringId(0);
    pub const JAVA_LANG_OBJECT: StringId = StringId(1);
    pub const JAVA_LANG_STRING: StringId = StringId(2);
    pub const JAVA_LANG_CLASS: StringId = StringId(3);
}

const PRELOADED: [&str; 4] = ["", "java/lang/Object", "java/lang/String", "java/lang/Class"];

struct StringPoolInner {
    ids: BiHashMap<StringId, Arc<str>>,
}

/// Interned strings used as class-name handles. Ids are dense and never reused.
pub struct StringPool {
    inner: RwLock<StringPoolInner>,
}

impl StringPool {
    pub fn new() -> Self {
        let mut ids = BiHashMap::new();
        for (i, preloaded) in PRELOADED.iter().enumerate() {
            ids.insert(StringId(i as u32), Arc::from(*preloaded));
        }
        Self { inner: RwLock::new(StringPoolInner { ids }) }
    }

    pub fn intern(&self, string: &str) -> StringId {
        if let Some(id) = self.inner.read().ids.get_by_right(string) {
            return *id;
        }
        let mut guard = self.inner.write();
        // another thread may have won between dropping the read lock and taking the write lock
        if let Some(id) = guard.ids.get_by_right(string) {
            return *id;
        }
        let new_id = StringId(guard.ids.len() as u32);
        guard.ids.insert(new_id, Arc::from(string));
        new_id
    }

    pub fn lookup(&self, id: StringId) -> Option<Arc<str>> {
        self.inner.read().ids.get_by_left(&id).cloned()
    }

    pub fn contains(&self, string: &str) -> bool {
        self.inner.read().ids.contains_right(string)
    }

    pub fn len(&self) -> usize {
        self.inner.read().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dump(&self) -> Vec<(StringId, Arc<str>)> {
        let guard = self.inner.read();
        let mut res = guard.ids.iter().map(|(id, string)| (*id, string.clone())).collect::<Vec<_>>();
        res.sort_by_key(|(id, _)| *id);
        res
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref STRING_POOL: StringPool = StringPool::new();
}

pub fn string_pool() -> &'static StringPool {
    &STRING_POOL
}

pub fn intern(string: &str) -> StringId {
    string_pool().intern(string)
}

/// Looks up an id in the process-wide pool. Unknown ids give the empty string.
pub fn lookup(id: StringId) -> Arc<str> {
    string_pool().lookup(id).unwrap_or_else(|| Arc::from(""))
}
