use super::*;
use crate::constants::method;

fn request(origin: Option<&'static str>) -> RequestContext<'static> {
    RequestContext::new(method::GET, origin)
}

mod policy_value {
    use super::*;

    mod normalize {
        use super::*;

        #[test]
        fn should_reflect_when_value_is_true() {
            // Arrange & Act
            let policy = PolicyValue::from(true).normalize();

            // Assert
            assert!(matches!(policy, ResolvedPolicy::Reflect));
        }

        #[test]
        fn should_disable_when_value_is_false() {
            // Arrange & Act
            let policy = PolicyValue::from(false).normalize();

            // Assert
            assert!(matches!(policy, ResolvedPolicy::Disabled));
        }

        #[test]
        fn should_disable_when_value_is_absent() {
            // Arrange & Act
            let policy = PolicyValue::from(None::<String>).normalize();

            // Assert
            assert!(matches!(policy, ResolvedPolicy::Disabled));
        }

        #[test]
        fn should_disable_when_string_is_empty() {
            // Arrange & Act
            let policy = PolicyValue::from("").normalize();

            // Assert
            assert!(matches!(policy, ResolvedPolicy::Disabled));
        }

        #[test]
        fn should_fix_origin_when_value_is_string() {
            // Arrange & Act
            let policy = PolicyValue::from(Some("http://fixed.test")).normalize();

            // Assert
            match policy {
                ResolvedPolicy::Fixed(value) => assert_eq!(value, "http://fixed.test"),
                other => panic!("expected fixed policy, got {other:?}"),
            }
        }

        #[test]
        fn should_allow_any_when_string_is_wildcard() {
            // Arrange & Act
            let policy = PolicyValue::from(String::from("*")).normalize();

            // Assert
            assert!(matches!(policy, ResolvedPolicy::Any));
        }

        #[test]
        fn should_wrap_single_matcher_into_set() {
            // Arrange
            let matcher = OriginMatcher::pattern_str(r"^http://localhost:").unwrap();

            // Act
            let policy = PolicyValue::from(matcher).normalize();

            // Assert
            match policy {
                ResolvedPolicy::Set(matchers) => assert_eq!(matchers.len(), 1),
                other => panic!("expected set policy, got {other:?}"),
            }
        }

        #[test]
        fn should_keep_list_order_when_value_is_list() {
            // Arrange
            let matchers = vec![
                OriginMatcher::literal("http://b.test"),
                OriginMatcher::literal("http://a.test"),
            ];

            // Act
            let policy = PolicyValue::from(matchers).normalize();

            // Assert
            match policy {
                ResolvedPolicy::Set(matchers) => {
                    assert!(matches!(&matchers[0], OriginMatcher::Literal(v) if v == "http://b.test"));
                    assert!(matches!(&matchers[1], OriginMatcher::Literal(v) if v == "http://a.test"));
                }
                other => panic!("expected set policy, got {other:?}"),
            }
        }

        #[test]
        fn should_disable_when_list_is_empty() {
            // Arrange & Act
            let policy = PolicyValue::from(Vec::<OriginMatcher>::new()).normalize();

            // Assert
            assert!(matches!(policy, ResolvedPolicy::Disabled));
        }

        #[test]
        fn should_pass_through_when_value_is_already_resolved() {
            // Arrange & Act
            let policy = PolicyValue::from(ResolvedPolicy::Any).normalize();

            // Assert
            assert!(matches!(policy, ResolvedPolicy::Any));
        }
    }
}

mod origin_policy {
    use super::*;

    mod default {
        use super::*;

        #[test]
        fn should_be_any_when_nothing_configured() {
            // Arrange & Act
            let policy = OriginPolicy::default();

            // Assert
            assert!(matches!(policy.resolved(), Some(ResolvedPolicy::Any)));
        }
    }

    mod fixed {
        use super::*;

        #[test]
        fn should_become_any_when_value_is_wildcard() {
            // Arrange & Act
            let policy = OriginPolicy::fixed("*");

            // Assert
            assert!(matches!(policy.resolved(), Some(ResolvedPolicy::Any)));
        }

        #[test]
        fn should_keep_literal_when_value_is_origin() {
            // Arrange & Act
            let policy = OriginPolicy::fixed("http://x.test");

            // Assert
            assert!(matches!(
                policy.resolved(),
                Some(ResolvedPolicy::Fixed(value)) if value == "http://x.test"
            ));
        }
    }

    mod set_literals_first {
        use super::*;

        #[test]
        fn should_move_literals_ahead_of_patterns_when_mixed() {
            // Arrange
            let pattern = OriginMatcher::pattern_str(r"^http://localhost:").unwrap();

            // Act
            let policy = OriginPolicy::set_literals_first([
                pattern,
                OriginMatcher::literal("http://first.test"),
                OriginMatcher::literal("http://second.test"),
            ]);

            // Assert
            match policy.resolved() {
                Some(ResolvedPolicy::Set(matchers)) => {
                    assert!(matches!(&matchers[0], OriginMatcher::Literal(v) if v == "http://first.test"));
                    assert!(matches!(&matchers[1], OriginMatcher::Literal(v) if v == "http://second.test"));
                    assert!(matches!(&matchers[2], OriginMatcher::Pattern(_)));
                }
                other => panic!("expected set policy, got {other:?}"),
            }
        }
    }

    mod resolve {
        use super::*;
        use std::io;

        #[tokio::test]
        async fn should_borrow_policy_when_not_computed() {
            // Arrange
            let policy = OriginPolicy::reflect();
            let ctx = request(Some("http://a.test"));

            // Act
            let resolved = policy.resolve(&ctx).await.unwrap();

            // Assert
            assert!(matches!(resolved, Cow::Borrowed(ResolvedPolicy::Reflect)));
        }

        #[tokio::test]
        async fn should_normalize_callback_result_when_sync_callback_succeeds() {
            // Arrange
            let policy = OriginPolicy::computed(|origin: Option<&str>| {
                Ok::<_, BoxError>(origin == Some("http://trusted.test"))
            });
            let trusted = request(Some("http://trusted.test"));
            let other = request(Some("http://other.test"));

            // Act
            let trusted_policy = policy.resolve(&trusted).await.unwrap();
            let other_policy = policy.resolve(&other).await.unwrap();

            // Assert
            assert!(matches!(trusted_policy.as_ref(), ResolvedPolicy::Reflect));
            assert!(matches!(other_policy.as_ref(), ResolvedPolicy::Disabled));
        }

        #[tokio::test]
        async fn should_pass_origin_to_async_callback() {
            // Arrange
            let policy = OriginPolicy::computed_async(|origin: Option<String>| async move {
                Ok::<_, BoxError>(origin)
            });
            let ctx = request(Some("http://echo.test"));

            // Act
            let resolved = policy.resolve(&ctx).await.unwrap();

            // Assert
            assert!(matches!(
                resolved.as_ref(),
                ResolvedPolicy::Fixed(value) if value == "http://echo.test"
            ));
        }

        #[tokio::test]
        async fn should_fail_when_callback_reports_error() {
            // Arrange
            let policy = OriginPolicy::computed(|_origin: Option<&str>| {
                Err::<bool, _>(io::Error::other("lookup failed"))
            });
            let ctx = request(Some("http://a.test"));

            // Act
            let result = policy.resolve(&ctx).await;

            // Assert
            match result {
                Err(ResolutionError::Callback(err)) => {
                    assert_eq!(err.to_string(), "lookup failed")
                }
                other => panic!("expected callback failure, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn should_use_resolver_when_trait_is_implemented() {
            // Arrange
            struct MethodAware;

            impl OriginResolver for MethodAware {
                fn resolve<'a>(
                    &'a self,
                    request: &'a RequestContext<'a>,
                ) -> BoxFuture<'a, Result<PolicyValue, BoxError>> {
                    let value = PolicyValue::from(request.method == method::GET);
                    future::ready(Ok(value)).boxed()
                }
            }

            let policy = OriginPolicy::resolver(MethodAware);
            let ctx = RequestContext::new(method::POST, Some("http://a.test"));

            // Act
            let resolved = policy.resolve(&ctx).await.unwrap();

            // Assert
            assert!(matches!(resolved.as_ref(), ResolvedPolicy::Disabled));
        }
    }
}
