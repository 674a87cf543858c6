use lambda_http::RequestExt;
use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::{
    parse_movie_id, CastRepository, ErrorResponse, MessageResponse, MovieRepository,
    MovieResponse,
};
use shared::utils::json_response;

pub(crate) struct HandlerDeps<M: MovieRepository, C: CastRepository> {
    pub movie_repo: M,
    pub cast_repo: C,
}

pub(crate) async fn function_handler<M: MovieRepository, C: CastRepository>(
    deps: &HandlerDeps<M, C>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    let movie_id = event
        .path_parameters_ref()
        .and_then(|params| params.first("movieId"))
        .and_then(parse_movie_id);
    // the flag is true only for the literal string "true"
    let include_cast = event.query_string_parameters().first("cast") == Some("true");

    let Some(movie_id) = movie_id else {
        return json_response(&StatusCode::NOT_FOUND, &MessageResponse::missing_movie_id());
    };

    let movie = match deps.movie_repo.get_movie(movie_id).await {
        Err(e) => {
            tracing::error!("Failed to retrieve movie {}: {:?}", movie_id, e);
            return json_response(
                &StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorResponse::internal(),
            );
        }
        Ok(None) => {
            return json_response(&StatusCode::NOT_FOUND, &MessageResponse::invalid_movie_id());
        }
        Ok(Some(movie)) => movie,
    };

    if !include_cast {
        return json_response(&StatusCode::OK, &MovieResponse::new(movie));
    }

    match deps.cast_repo.list_cast_members(movie_id).await {
        Ok(cast) => json_response(&StatusCode::OK, &MovieResponse::with_cast(movie, cast)),
        Err(e) => {
            tracing::error!("Failed to query cast for movie {}: {:?}", movie_id, e);
            json_response(
                &StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorResponse::internal(),
            )
        }
    }
}
