//! End-to-end dispatch scenarios over a realistically shaped route table.

use http::{Method, StatusCode};
use mindy_routers::{MatchResult, RestAction, Router};

fn blog_table() -> Router<&'static str> {
	let mut router = Router::new();
	router
		.named(Method::GET, "/blog/", "blog:index", "blog-index")
		.unwrap();
	router
		.named(Method::GET, "/blog/view/{id:i}", "blog:view", "blog-view")
		.unwrap();
	router
}

#[test]
fn blog_scenario_reverse_and_dispatch() {
	let router = blog_table();

	assert_eq!(router.reverse("blog:view", 1).unwrap(), "/blog/view/1");

	let result = router.dispatch(&Method::GET, "/blog/view/1");
	assert_eq!(result.handler(), Some(&"blog-view"));
	// Extracted as an integer, not a string.
	assert_eq!(result.params().unwrap().get_int("id"), Some(1));
	assert_eq!(result.params().unwrap().get_str("id"), None);

	// Type mismatch on `i` is NotFound, not an error.
	assert!(matches!(
		router.dispatch(&Method::GET, "/blog/view/abc"),
		MatchResult::NotFound
	));
}

#[test]
fn round_trip_law() {
	let mut router = Router::new();
	router
		.named(Method::GET, "/users/{id:i}/posts/{slug:c}", "post", "post")
		.unwrap();
	router
		.named(Method::POST, "/users/{id:i}/comment", "comment", "comment")
		.unwrap();
	router
		.named(Method::GET, "/user/{name:c}?", "profile", "profile")
		.unwrap();

	let uri = router.reverse_with("post", &[("id", "7"), ("slug", "intro")]).unwrap();
	let result = router.dispatch(&Method::GET, &uri);
	assert_eq!(result.handler(), Some(&"post"));
	assert_eq!(result.params().unwrap().get_int("id"), Some(7));
	assert_eq!(result.params().unwrap().get_str("slug"), Some("intro"));

	let uri = router.reverse("comment", 3).unwrap();
	assert_eq!(router.dispatch(&Method::POST, &uri).handler(), Some(&"comment"));

	// Optional omitted on reverse still round-trips.
	let uri = router.reverse("profile", ()).unwrap();
	assert_eq!(uri, "/user");
	assert_eq!(router.dispatch(&Method::GET, &uri).handler(), Some(&"profile"));
}

#[test]
fn method_not_allowed_carries_allowed_set() {
	let mut router = Router::new();
	router.get("/thing", "read").unwrap();
	router.post("/thing", "create").unwrap();
	router.delete("/thing", "remove").unwrap();

	let result = router.dispatch(&Method::PUT, "/thing");
	assert_eq!(
		result.allowed(),
		Some(&[Method::GET, Method::POST, Method::DELETE][..])
	);
}

#[test]
fn method_not_allowed_takes_priority_over_slash_toggle() {
	let mut router = Router::new();
	router.post("/submit", "submit").unwrap();
	router.get("/submit/", "form").unwrap();

	// `/submit` exists under POST, so GET gets a 405 rather than a redirect
	// to `/submit/`.
	let result = router.dispatch(&Method::GET, "/submit");
	assert_eq!(result.allowed(), Some(&[Method::POST][..]));
}

#[test]
fn trailing_slash_redirects_both_directions() {
	let mut router = Router::new();
	router.get("/with/", "with").unwrap();
	router.get("/without", "without").unwrap();

	match router.dispatch(&Method::GET, "/with") {
		MatchResult::Redirect { location, status } => {
			assert_eq!(location, "/with/");
			assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
		}
		other => panic!("expected redirect, got {:?}", other),
	}
	match router.dispatch(&Method::GET, "/without/") {
		MatchResult::Redirect { location, .. } => assert_eq!(location, "/without"),
		other => panic!("expected redirect, got {:?}", other),
	}
}

#[test]
fn overriding_the_trailing_slash_hook_changes_the_result() {
	let mut router =
		Router::new().with_trailing_slash_hook(|_| Some(StatusCode::TEMPORARY_REDIRECT));
	router.get("/blog/", "index").unwrap();

	match router.dispatch(&Method::GET, "/blog") {
		MatchResult::Redirect { status, .. } => {
			assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
		}
		other => panic!("expected redirect, got {:?}", other),
	}

	// A hook returning None downgrades the toggle to NotFound...
	let mut router = Router::new().with_trailing_slash_hook(|_| None);
	router.get("/blog/", "index").unwrap();
	assert!(matches!(
		router.dispatch(&Method::GET, "/blog"),
		MatchResult::NotFound
	));
	// ...without touching already-slash-correct URIs.
	assert!(router.dispatch(&Method::GET, "/blog/").is_matched());
}

#[test]
fn registration_order_is_priority_order() {
	let mut router = Router::new();
	router.get("/overlap/{a:c}", "slug-route").unwrap();
	router.get("/overlap/{b:i}", "int-route").unwrap();

	// `/overlap/123` satisfies both classes; the earlier registration wins.
	assert_eq!(
		router.dispatch(&Method::GET, "/overlap/123").handler(),
		Some(&"slug-route")
	);
}

#[test]
fn group_order_preserved_in_flat_table() {
	let mut router = Router::new();
	router.get("/{page:c}", "catch-page").unwrap();
	router
		.group("/admin", |admin| admin.get("/{page:c}", "admin-page"))
		.unwrap();

	// The pre-group catch-all was registered first but its class cannot
	// cross `/`, so the grouped route still matches its own prefix.
	assert_eq!(
		router.dispatch(&Method::GET, "/admin/users").handler(),
		Some(&"admin-page")
	);
	assert_eq!(
		router.dispatch(&Method::GET, "/about").handler(),
		Some(&"catch-page")
	);
}

#[test]
fn restful_controller_scenario() {
	let mut router = Router::new();
	router
		.restful(
			"/user",
			vec![
				RestAction::new("getIndex", "get-index"),
				RestAction::new("postCreate", "post-create"),
			],
		)
		.unwrap();

	assert_eq!(
		router.dispatch(&Method::GET, "/user").handler(),
		Some(&"get-index")
	);
	assert_eq!(
		router.dispatch(&Method::POST, "/user").handler(),
		Some(&"post-create")
	);

	let result = router.dispatch(&Method::DELETE, "/user");
	assert_eq!(result.allowed(), Some(&[Method::GET, Method::POST][..]));
}

#[test]
fn optional_placeholder_scenario() {
	let mut router = Router::new();
	router.get("/user/{name:c}?", "profile").unwrap();

	let result = router.dispatch(&Method::GET, "/user");
	assert!(result.is_matched());
	assert!(!result.params().unwrap().contains("name"));

	let result = router.dispatch(&Method::GET, "/user/joe");
	assert_eq!(result.params().unwrap().get_str("name"), Some("joe"));
}

#[test]
fn dispatch_through_shared_reference() {
	use std::sync::Arc;

	let router = Arc::new(blog_table());
	let handles: Vec<_> = (0i64..4)
		.map(|i| {
			let router = Arc::clone(&router);
			std::thread::spawn(move || {
				let uri = format!("/blog/view/{}", i);
				let result = router.dispatch(&Method::GET, &uri);
				assert_eq!(result.params().unwrap().get_int("id"), Some(i));
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}
}

#[test]
fn csrf_exempt_flag_surfaces_on_match() {
	use mindy_routers::{MethodSpec, PathPattern, Route};

	let mut router = Router::new();
	let pattern = PathPattern::new("/webhook/{id:i}").unwrap();
	router
		.add_route(
			Route::new(MethodSpec::Only(Method::POST), pattern, "webhook").with_csrf_exempt(),
		)
		.unwrap();

	let result = router.dispatch(&Method::POST, "/webhook/5");
	assert!(result.route().unwrap().is_csrf_exempt());
}
