use serde::{Deserialize, Serialize};

/// One movie record as returned by the YTS list API.
///
/// Every field defaults so that sparse records (missing images, no
/// torrents yet) decode and round-trip through the snapshot unchanged.
/// Records are never mutated once appended to the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: u64,
    pub url: String,
    pub imdb_code: String,
    pub title: String,
    pub title_english: String,
    pub title_long: String,
    pub slug: String,
    pub year: i32,
    pub rating: f64,
    pub runtime: u32,
    pub genres: Vec<String>,
    pub download_count: u64,
    pub like_count: u64,
    pub description_intro: String,
    pub description_full: String,
    pub yt_trailer_code: String,
    pub language: String,
    pub mpa_rating: String,
    pub background_image: String,
    pub background_image_original: String,
    pub small_cover_image: String,
    pub medium_cover_image: String,
    pub large_cover_image: String,
    pub torrents: Vec<Torrent>,
    pub date_uploaded: String,
    pub date_uploaded_unix: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Torrent {
    pub url: String,
    pub hash: String,
    pub quality: String,
    pub seeds: u32,
    pub peers: u32,
    pub size: String,
    pub size_bytes: u64,
    pub date_uploaded: String,
    pub date_uploaded_unix: i64,
}

/// Envelope of one `list_movies` page response.
#[derive(Debug, Clone, Deserialize)]
pub struct Payload {
    pub data: MoviePage,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoviePage {
    pub movie_count: u64,
    pub limit: u32,
    pub page_number: u32,
    pub movies: Vec<Movie>,
}

impl Movie {
    /// All downloadable asset URLs for this movie: the five image
    /// variants followed by one torrent file per quality. Empty URLs
    /// (fields the API omitted) are filtered out.
    pub fn asset_urls(&self) -> Vec<&str> {
        let mut urls = vec![
            self.background_image.as_str(),
            self.background_image_original.as_str(),
            self.small_cover_image.as_str(),
            self.medium_cover_image.as_str(),
            self.large_cover_image.as_str(),
        ];
        urls.extend(self.torrents.iter().map(|t| t.url.as_str()));
        urls.retain(|u| !u.is_empty());
        urls
    }

    /// Long title when the API provided one, plain title otherwise.
    pub fn display_title(&self) -> &str {
        if self.title_long.is_empty() {
            &self.title
        } else {
            &self.title_long
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_with_assets() -> Movie {
        Movie {
            id: 10,
            title: "Primer".to_string(),
            background_image: "https://yts.am/assets/images/movies/primer/background.jpg".to_string(),
            background_image_original: "https://yts.am/assets/images/movies/primer/background_orig.jpg".to_string(),
            small_cover_image: "https://yts.am/assets/images/movies/primer/small-cover.jpg".to_string(),
            medium_cover_image: "https://yts.am/assets/images/movies/primer/medium-cover.jpg".to_string(),
            large_cover_image: "https://yts.am/assets/images/movies/primer/large-cover.jpg".to_string(),
            torrents: vec![
                Torrent {
                    url: "https://yts.am/torrent/download/abc".to_string(),
                    quality: "720p".to_string(),
                    ..Default::default()
                },
                Torrent {
                    url: "https://yts.am/torrent/download/def".to_string(),
                    quality: "1080p".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn asset_urls_are_images_then_torrents() {
        let movie = movie_with_assets();
        let urls = movie.asset_urls();
        assert_eq!(urls.len(), 7);
        assert_eq!(urls[0], movie.background_image);
        assert_eq!(urls[4], movie.large_cover_image);
        assert_eq!(urls[5], movie.torrents[0].url);
        assert_eq!(urls[6], movie.torrents[1].url);
    }

    #[test]
    fn asset_urls_skips_empty_fields() {
        let mut movie = movie_with_assets();
        movie.small_cover_image.clear();
        movie.torrents[0].url.clear();
        assert_eq!(movie.asset_urls().len(), 5);
    }

    #[test]
    fn payload_decodes_sparse_records() {
        let body = r#"{
            "status": "ok",
            "data": {
                "movie_count": 2,
                "limit": 50,
                "page_number": 1,
                "movies": [
                    {"id": 1, "title": "A", "year": 2004},
                    {"id": 2}
                ]
            }
        }"#;
        let payload: Payload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.data.movie_count, 2);
        assert_eq!(payload.data.movies.len(), 2);
        assert_eq!(payload.data.movies[0].year, 2004);
        assert!(payload.data.movies[1].title.is_empty());
        assert!(payload.data.movies[1].torrents.is_empty());
    }
}
