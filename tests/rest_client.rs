/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers;
    use flickr::args;
    use flickr::rest::{Args, Client, FlickrError, Perms, Photo, Record, TokenPair, urls};
    use std::io::Write;

    async fn client() -> Client {
        helpers::install_stub_config(None);
        Client::new(helpers::creds()).await.unwrap()
    }

    #[tokio::test]
    async fn namespace_follows_catalog() {
        let client = client().await;

        let method = client.ns("people").unwrap().method("getPhotos").unwrap();
        assert_eq!(method.endpoint(), "flickr.people.getPhotos");

        let comments = client.ns("photos").unwrap().ns("comments").unwrap();
        assert_eq!(comments.node().path(), "flickr.photos.comments");
        assert_eq!(comments.method("getList").unwrap().endpoint(), "flickr.photos.comments.getList");

        assert_eq!(
            client.method("flickr.test.echo").unwrap().endpoint(),
            client.method("test.echo").unwrap().endpoint()
        );
        assert!(matches!(client.ns("galleries"), Err(FlickrError::UnknownNamespace(p)) if p == "flickr.galleries"));
        assert!(matches!(
            client.ns("people").unwrap().method("getFavorites"),
            Err(FlickrError::UnknownMethod(p)) if p == "flickr.people.getFavorites"
        ));

        let mut endpoints: Vec<&str> = helpers::CATALOG.to_vec();
        endpoints.sort();
        assert_eq!(client.namespace().endpoints(), endpoints);
    }

    #[tokio::test]
    async fn call_unwraps_envelope() {
        let client = client().await;
        let photos = client
            .ns("people")
            .unwrap()
            .call("getPhotos", args! { "user_id" => "12@N01" })
            .await
            .unwrap();
        assert_eq!(photos.kind(), Some("photos"));
        assert_eq!(photos.field("total").as_deref(), Some("2"));

        let list = photos.get("photo").and_then(|p| p.as_array()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(urls::url(&list[0]).unwrap(), "https://farm1.staticflickr.com/2/2985209085_abc.jpg");
        assert_eq!(urls::url_short(&list[0]).unwrap(), "https://flic.kr/p/5xMYEa");
        assert_eq!(urls::url_photopage(&list[1]).unwrap(), "https://www.flickr.com/photos/12@N01/123");
    }

    #[tokio::test]
    async fn remote_failure_is_structured() {
        let client = client().await;
        let err = client
            .method("people.getInfo")
            .unwrap()
            .call(args! { "user_id" => "nobody" })
            .await
            .unwrap_err();
        match err {
            FlickrError::Failed(f) => {
                assert_eq!(f.code, "1");
                assert_eq!(f.message, "User not found");
                assert_eq!(f.method, "flickr.people.getInfo");
            }
            other => panic!("unexpected error {other:?}"),
        }

        // Raw endpoint identifiers bypass the namespace
        let err = client.call("flickr.nope.nothing", Args::new()).await.unwrap_err();
        assert!(matches!(err, FlickrError::Failed(f) if f.code == "112"));
    }

    #[tokio::test]
    async fn oauth_overrides_are_signed_not_sent() {
        let client = client().await;
        let echo = client
            .method("test.echo")
            .unwrap()
            .call(
                Args::new()
                    .with("name", "value with spaces & symbols")
                    .with("safe", true)
                    .with_oauth("oauth_callback", "https://example.com/cb"),
            )
            .await
            .unwrap();

        assert_eq!(echo.kind(), None);
        assert_eq!(echo.field("name").as_deref(), Some("value with spaces & symbols"));
        assert_eq!(echo.field("safe").as_deref(), Some("1"));
        assert_eq!(echo.field("format").as_deref(), Some("json"));
        assert_eq!(echo.field("nojsoncallback").as_deref(), Some("1"));
        assert_eq!(echo.field("method").as_deref(), Some("flickr.test.echo"));
        assert!(echo.get("oauth_callback").is_none());

        let signed = echo.get("signed").unwrap();
        assert_eq!(signed.field("oauth_callback").as_deref(), Some("https://example.com/cb"));
        assert_eq!(signed.field("oauth_signature_method").as_deref(), Some("HMAC-SHA1"));
        assert!(signed.field("oauth_token").is_none());
    }

    #[tokio::test]
    async fn oauth_handshake() {
        let mut client = client().await;

        // Anonymous calls cannot log in
        let err = client.call("flickr.test.login", Args::new()).await.unwrap_err();
        assert!(matches!(err, FlickrError::Failed(f) if f.code == "99"));

        let request = client
            .get_request_token(Args::new().with_oauth("oauth_callback", "https://example.com/cb"))
            .await
            .unwrap();
        assert_eq!(request.get("oauth_callback_confirmed"), Some("true"));
        let request = request.pair().unwrap();
        assert_eq!(request, TokenPair::new("req-token", "req-secret"));

        let url = client
            .get_authorize_url(&request.token, args! { "perms" => Perms::Delete })
            .unwrap();
        assert!(url.ends_with("/services/oauth/authorize?oauth_token=req-token&perms=delete"));

        let err = client
            .get_access_token(&request.token, &request.secret, "bad-verifier")
            .await
            .unwrap_err();
        assert!(matches!(err, FlickrError::OAuth { status: 401, .. }));
        assert!(client.access_token().is_none());

        let access = client
            .get_access_token(&request.token, &request.secret, "good-verifier")
            .await
            .unwrap();
        assert_eq!(access.get("fullname"), Some("Jane Doe"));
        assert_eq!(access.get("user_nsid"), Some("12@N01"));
        assert_eq!(client.access_token(), Some(&TokenPair::new("acc-token", "acc-secret")));

        let login = client.ns("test").unwrap().call("login", Args::new()).await.unwrap();
        assert_eq!(login.kind(), Some("user"));
        assert_eq!(login.field("username").as_deref(), Some("jane"));

        client.set_access_token(None);
        assert!(client.call("flickr.test.login", Args::new()).await.is_err());
    }

    #[tokio::test]
    async fn upload_and_replace() {
        let client = client().await;

        let uploaded = client
            .upload_photo(
                Photo::from_bytes("sunset.jpg", vec![0xffu8, 0xd8, 0xff]),
                args! { "title" => "Sunset", "is_public" => false },
            )
            .await
            .unwrap();
        assert_eq!(uploaded.kind(), Some("rsp"));
        assert_eq!(uploaded.content().as_deref(), Some("12345"));
        assert!(uploaded.field("secret").is_none());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xd8, 0xff]).unwrap();
        let replaced = client
            .replace_photo(Photo::from_path(file.path()), args! { "photo_id" => "12345" })
            .await
            .unwrap();
        assert_eq!(replaced.content().as_deref(), Some("67890"));
        assert_eq!(replaced.field("secret").as_deref(), Some("abc"));
        assert_eq!(replaced.field("originalsecret").as_deref(), Some("def"));

        let err = client
            .upload_photo(Photo::from_bytes("notes.txt", b"text".to_vec()), args! { "title" => "FAILME" })
            .await
            .unwrap_err();
        match err {
            FlickrError::Failed(f) => {
                assert_eq!(f.code, "5");
                assert_eq!(f.message, "Filetype was not recognised");
                assert!(f.method.ends_with("/services/upload/"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let err = client
            .upload_photo(Photo::from_path("/nonexistent/photo.jpg"), Args::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FlickrError::Io(_)));
    }
}
