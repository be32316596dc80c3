// crates/task_store/tests/integration_store.rs

#[cfg(test)]
mod integration_store {
    use std::fs;
    use task_store::TaskStore;
    use tempfile::tempdir;

    /// Adding a task to a brand new file assigns id 1.
    #[test]
    fn test_first_task_gets_id_one() {
        let dir = tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.txt")).unwrap();

        let id = store.add("Buy milk", "2024-01-01").unwrap();
        assert_eq!(id, 1);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "1. Buy milk - 2024-01-01\n"
        );
    }

    /// After removals the next id follows the largest remaining id, so gaps
    /// stay and no id is ever reused while its line exists.
    #[test]
    fn test_ids_follow_largest_remaining_id() {
        let dir = tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.txt")).unwrap();

        for n in 1..=11 {
            let id = store.add(&format!("Task {}", n), "soon").unwrap();
            assert_eq!(id, n);
        }

        store.remove_task("5").unwrap();
        store.remove_task("6").unwrap();
        assert_eq!(store.add("After gap", "later").unwrap(), 12);

        store.remove_task("12").unwrap();
        store.remove_task("11").unwrap();
        assert_eq!(store.generate_id().unwrap(), 11);
    }

    /// Removing an id deletes exactly that line and keeps the others in order.
    #[test]
    fn test_remove_preserves_order_of_remaining_lines() {
        let dir = tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.txt")).unwrap();
        store.add("Alpha", "Mon").unwrap();
        store.add("Bravo", "Tue").unwrap();
        store.add("Charlie", "Wed").unwrap();
        store.add("Delta", "Thu").unwrap();

        assert_eq!(store.remove_task("2").unwrap(), 1);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "1. Alpha - Mon\n3. Charlie - Wed\n4. Delta - Thu\n"
        );
    }

    /// Removing an id that is not present leaves the content unchanged.
    #[test]
    fn test_remove_missing_id_is_a_no_op() {
        let dir = tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.txt")).unwrap();
        store.add("Alpha", "Mon").unwrap();
        store.add("Bravo", "Tue").unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        assert_eq!(store.remove_task("42").unwrap(), 0);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    /// Hand-edited files can repeat an id; every matching line is dropped.
    #[test]
    fn test_remove_drops_every_line_with_the_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "1. a - x\n2. b - y\n1. c - z\n").unwrap();
        let store = TaskStore::open(&path).unwrap();

        assert_eq!(store.remove_task("1").unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "2. b - y\n");
    }

    /// Listing an empty file produces no output at all.
    #[test]
    fn test_list_empty_file() {
        let dir = tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.txt")).unwrap();

        let mut out = Vec::new();
        store.list_tasks(&mut out).unwrap();
        assert!(out.is_empty());
    }

    /// Listing N tasks produces exactly N lines.
    #[test]
    fn test_list_prints_one_line_per_task() {
        let dir = tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.txt")).unwrap();
        store.add("Alpha", "Mon").unwrap();
        store.add("Bravo", "Tue").unwrap();
        store.add("Charlie", "Wed").unwrap();

        let mut out = Vec::new();
        store.list_tasks(&mut out).unwrap();
        let listing = String::from_utf8(out).unwrap();
        assert_eq!(listing.lines().count(), 3);
        assert_eq!(listing, "1. Alpha - Mon\n2. Bravo - Tue\n3. Charlie - Wed\n");
    }

    /// Ids are matched as written: a zero-padded or signed id never removes
    /// a plain line, and a plain id never removes a zero-padded one.
    #[test]
    fn test_remove_matches_id_text_exactly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "1. a - x\n2. b - y\n").unwrap();
        let store = TaskStore::open(&path).unwrap();

        assert_eq!(store.remove_task("+2").unwrap(), 0);
        assert_eq!(store.remove_task("02").unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1. a - x\n2. b - y\n");

        fs::write(&path, "02. x - y\n").unwrap();
        assert_eq!(store.remove_task("2").unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "02. x - y\n");
    }

    /// A store reopened on the same path sees everything written before.
    #[test]
    fn test_state_is_rederived_from_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        TaskStore::open(&path).unwrap().add("Alpha", "Mon").unwrap();

        fs::write(&path, format!("{}7. Hand edited - Sun\n", fs::read_to_string(&path).unwrap()))
            .unwrap();

        let reopened = TaskStore::open(&path).unwrap();
        assert_eq!(reopened.add("Bravo", "Tue").unwrap(), 8);
    }
}
