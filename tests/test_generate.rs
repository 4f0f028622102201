use pantry_chef::error::GENERATION_FAILED_MESSAGE;
use pantry_chef::{
    Difficulty, IngredientSet, PreferenceProfile, RecipeRecommender, RecipeRequest,
    RecommendError,
};
use serde_json::json;

const CHICKEN_RICE: &str = r#"[{
    "title": "Chicken Fried Rice",
    "description": "A fast weeknight fried rice.",
    "ingredients": ["2 chicken breasts", "2 cups cooked rice", "2 eggs", "soy sauce"],
    "instructions": ["Dice the chicken", "Stir-fry the chicken", "Add rice and eggs", "Season"],
    "cookTime": 20,
    "servings": 2,
    "difficulty": "Easy",
    "cuisine": "Asian",
    "dietaryTags": ["dairy-free"],
    "nutritionalInfo": {"calories": 520, "protein": 38, "carbs": 55, "fat": 14}
}]"#;

fn completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

fn chicken_and_rice() -> RecipeRequest {
    let ingredients: IngredientSet = ["chicken", "rice"].into_iter().collect();
    RecipeRequest::new(
        ingredients,
        PreferenceProfile::new().with_cooking_time(20).with_servings(2),
    )
}

fn recommender(base_url: String, api_key: Option<&str>) -> RecipeRecommender {
    let mut builder = RecipeRecommender::builder().base_url(base_url);
    if let Some(key) = api_key {
        builder = builder.api_key(key);
    }
    builder.build().unwrap()
}

#[tokio::test]
async fn test_generate_single_recipe() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test_key")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::Regex("'chicken', 'rice'".to_string()),
            mockito::Matcher::Regex("Maximum cooking time: 20 minutes".to_string()),
            mockito::Matcher::Regex("Servings: 2".to_string()),
            mockito::Matcher::Regex("professional chef and nutritionist".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(CHICKEN_RICE))
        .create_async()
        .await;

    let recipes = recommender(server.url(), Some("test_key"))
        .generate(&chicken_and_rice())
        .await
        .unwrap();

    assert_eq!(recipes.len(), 1);
    let recipe = &recipes[0];
    assert!(!recipe.id.is_empty());
    assert_eq!(recipe.title, "Chicken Fried Rice");
    assert!(!recipe.description.is_empty());
    assert_eq!(recipe.ingredients.len(), 4);
    assert_eq!(recipe.instructions[0], "Dice the chicken");
    assert_eq!(recipe.cook_time, 20);
    assert_eq!(recipe.servings, 2);
    assert_eq!(recipe.difficulty, Difficulty::Easy);
    assert_eq!(recipe.cuisine, "Asian");
    assert_eq!(recipe.dietary_tags, vec!["dairy-free"]);
    assert_eq!(recipe.nutritional_info.unwrap().protein, 38.0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_server_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let err = recommender(server.url(), Some("test_key"))
        .generate(&chicken_and_rice())
        .await
        .unwrap_err();

    match &err {
        RecommendError::Transport { status, reason } => {
            assert_eq!(*status, Some(500));
            assert!(reason.contains("500"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_without_api_key_never_calls_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let err = recommender(server.url(), None)
        .generate(&chicken_and_rice())
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::Configuration(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_with_prose_reply_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&format!(
            "Sure! Here are some ideas:\n{}",
            CHICKEN_RICE
        )))
        .create_async()
        .await;

    let err = recommender(server.url(), Some("test_key"))
        .generate(&chicken_and_rice())
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_generate_with_missing_field_is_malformed() {
    let without_instructions = CHICKEN_RICE.replace(
        r#""instructions": ["Dice the chicken", "Stir-fry the chicken", "Add rice and eggs", "Season"],"#,
        "",
    );
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&without_instructions))
        .create_async()
        .await;

    let err = recommender(server.url(), Some("test_key"))
        .generate(&chicken_and_rice())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("instructions"));
}

#[tokio::test]
async fn test_generate_with_empty_ingredients_never_calls_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let request = RecipeRequest::new(IngredientSet::new(), PreferenceProfile::default());
    let err = recommender(server.url(), Some("test_key"))
        .generate(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::InvalidRequest(_)));
    mock.assert_async().await;
}
