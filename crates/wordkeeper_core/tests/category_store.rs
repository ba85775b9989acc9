use wordkeeper_core::db::open_db_in_memory;
use wordkeeper_core::{
    Category, CategoryRepository, CategoryService, RecordKind, RepoError, RowCursor,
    SqliteCategoryRepository, SqliteWordRepository, Word, WordRepository,
};

#[test]
fn insert_get_and_list_categories() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    repo.insert_category(&Category::new(2, "colors")).unwrap();
    repo.insert_category(&Category::new(1, "Animals")).unwrap();
    let food = repo.insert_new_category("Food").unwrap();

    assert_eq!(
        repo.get_category(2).unwrap(),
        Some(Category::new(2, "colors"))
    );
    let names = repo
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["Animals", "colors", "Food"]);
    assert!(food.id > 2);
}

#[test]
fn insert_then_delete_then_lookup_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let category = Category::new(7, "Travel");
    service.add_with_id(&category).unwrap();
    assert_eq!(service.find_by_id(7).unwrap(), category);

    service.remove(7).unwrap();
    let err = service.find_by_id(7).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            kind: RecordKind::Category,
            id: 7
        }
    ));

    let err = service.remove(7).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn duplicate_category_id_is_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    service.add_with_id(&Category::new(1, "Verbs")).unwrap();
    let err = service
        .add_with_id(&Category::new(1, "Nouns"))
        .unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
}

#[test]
fn rename_does_not_touch_words() {
    let conn = open_db_in_memory().unwrap();
    let words = SqliteWordRepository::try_new(&conn).unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    service.add_with_id(&Category::new(1, "Verbs")).unwrap();
    words
        .insert_word(&Word::new(1, "run", "бежать", "Verbs"))
        .unwrap();

    service.rename(1, "Actions").unwrap();

    assert_eq!(service.find_by_id(1).unwrap().name, "Actions");
    assert_eq!(words.get_word(1).unwrap().unwrap().category, "Verbs");
    assert!(words.list_words_by_category("Actions").unwrap().is_empty());
}

#[test]
fn rename_and_propagate_rewrites_matching_words_only() {
    let conn = open_db_in_memory().unwrap();
    let words = SqliteWordRepository::try_new(&conn).unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    service.add_with_id(&Category::new(1, "Verbs")).unwrap();
    words
        .insert_word(&Word::new(1, "run", "бежать", "Verbs"))
        .unwrap();
    words
        .insert_word(&Word::new(2, "eat", "есть", "Verbs"))
        .unwrap();
    words
        .insert_word(&Word::new(3, "bread", "хлеб", "Food"))
        .unwrap();

    assert_eq!(service.rename_and_propagate(1, "Actions").unwrap(), 2);

    assert_eq!(words.list_words_by_category("Actions").unwrap().len(), 2);
    assert!(words.list_words_by_category("Verbs").unwrap().is_empty());
    assert_eq!(words.get_word(3).unwrap().unwrap().category, "Food");

    let err = service.rename_and_propagate(99, "Nothing").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { id: 99, .. }));
}

#[test]
fn remove_orphans_words_but_remove_with_words_cascades() {
    let conn = open_db_in_memory().unwrap();
    let words = SqliteWordRepository::try_new(&conn).unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let animals = service.add("Animals").unwrap();
    let food = service.add("Food").unwrap();
    words.insert_new_word("cat", "кошка", "Animals").unwrap();
    words.insert_new_word("dog", "собака", "Animals").unwrap();
    let bread = words.insert_new_word("bread", "хлеб", "Food").unwrap();

    service.remove(food.id).unwrap();
    assert_eq!(words.get_word(bread.id).unwrap().unwrap().category, "Food");

    assert_eq!(service.remove_with_words(animals.id).unwrap(), 2);
    assert!(service.list().unwrap().is_empty());
    assert!(words.list_words_by_category("Animals").unwrap().is_empty());
    assert!(words.get_word(bread.id).unwrap().is_some());
}

#[test]
fn cursor_read_path_returns_categories_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    repo.insert_category(&Category::new(3, "Food")).unwrap();
    repo.insert_category(&Category::new(1, "Animals")).unwrap();
    repo.insert_category(&Category::new(2, "Colors")).unwrap();

    let cursor = repo.open_cursor().unwrap();
    assert_eq!(cursor.count(), 3);
    assert_eq!(cursor.get_i64("_id").unwrap(), 1);

    let service = CategoryService::new(repo);
    assert_eq!(
        service.list_from_cursor().unwrap(),
        vec![
            Category::new(1, "Animals"),
            Category::new(2, "Colors"),
            Category::new(3, "Food"),
        ]
    );
}

#[test]
fn list_categories_folds_non_ascii_case() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    repo.insert_category(&Category::new(1, "Числа")).unwrap();
    repo.insert_category(&Category::new(2, "еда")).unwrap();
    repo.insert_category(&Category::new(3, "Животные")).unwrap();

    let ids = repo
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|category| category.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, [2, 3, 1]);
}
